use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::stream::TrackedFile;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Output stream error: {0}")]
    OutputStream(String),
    #[error("Sink error: {0}")]
    Sink(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How a blocking [`Playback::play`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The decoder ran out of audio.
    Completed,
    /// The cancellation token fired first.
    Interrupted,
}

/// Cooperative stop signal handed to a playback worker.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Builds decoder/player instances from file streams.
///
/// Implementations may hold thread-bound resources such as the audio output
/// device; only the players they produce cross into the worker thread.
pub trait AudioBackend {
    type Player: Playback;

    fn open(&mut self, stream: TrackedFile) -> Result<Self::Player, BackendError>;
}

/// One decoder/player instance for one stream.
pub trait Playback: Send + 'static {
    /// Plays until the stream is exhausted or `cancel` fires. Blocks.
    fn play(&mut self, cancel: &CancellationToken) -> Result<PlayOutcome, BackendError>;

    /// Releases the decoder and output. Safe to call more than once.
    fn close(&mut self);
}
