use std::io::{self, Write};
use std::path::Path;

use crate::backend::{AudioBackend, BackendError, CancellationToken, PlayOutcome, Playback};
use crate::stream::TrackedFile;

pub const USAGE: &str = "Usage: player-cli <mp3_file>";

#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleOutcome {
    Usage,
    NotFound,
    Played,
    Failed(String),
}

/// Plays `path` to the end on the calling thread, reporting progress and
/// failures as single lines on `out`.
///
/// The backend is only built once the file has been opened, so a bad path
/// never touches the audio device.
pub fn run<B, F, W>(path: Option<&Path>, make_backend: F, out: &mut W) -> io::Result<ConsoleOutcome>
where
    B: AudioBackend,
    F: FnOnce() -> B,
    W: Write,
{
    let Some(path) = path else {
        writeln!(out, "{}", USAGE)?;
        return Ok(ConsoleOutcome::Usage);
    };

    // Directories and unreadable files count as missing too.
    let opened = if path.is_dir() {
        Err(io::Error::from(io::ErrorKind::NotFound))
    } else {
        TrackedFile::open(path, 0)
    };

    let stream = match opened {
        Ok(stream) => stream,
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ) =>
        {
            writeln!(out, "File not found: {}", path.display())?;
            return Ok(ConsoleOutcome::NotFound);
        }
        Err(e) => return fail(out, &BackendError::Io(e)),
    };

    let mut backend = make_backend();
    let mut player = match backend.open(stream) {
        Ok(player) => player,
        Err(e) => return fail(out, &e),
    };

    writeln!(out, "Playing: {}", path.display())?;
    out.flush()?;

    let result = player.play(&CancellationToken::new());
    player.close();

    match result {
        Ok(PlayOutcome::Completed | PlayOutcome::Interrupted) => {
            log::debug!("finished {}", path.display());
            Ok(ConsoleOutcome::Played)
        }
        Err(e) => fail(out, &e),
    }
}

fn fail<W: Write>(out: &mut W, error: &BackendError) -> io::Result<ConsoleOutcome> {
    log::error!("{}", error);
    writeln!(out, "Error playing file: {}", error)?;
    Ok(ConsoleOutcome::Failed(error.to_string()))
}
