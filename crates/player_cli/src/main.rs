use std::path::PathBuf;

use argh::FromArgs;
use player_core::console::{self, ConsoleOutcome};
use player_core::{RodioBackend, Settings};

#[derive(FromArgs)]
/// Plays one MP3 file and exits when it ends.
struct Args {
    #[argh(positional)]
    /// path to the file to play
    file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = argh::from_env();
    let settings = Settings::load();

    let mut stdout = std::io::stdout().lock();
    match console::run(
        args.file.as_deref(),
        || RodioBackend::new(&settings),
        &mut stdout,
    ) {
        Ok(ConsoleOutcome::Failed(message)) => log::debug!("playback failed: {}", message),
        Ok(_) => {}
        Err(e) => log::error!("failed to write to stdout: {}", e),
    }
}
