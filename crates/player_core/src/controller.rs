use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use thiserror::Error;

use crate::audio::{AudioFile, AudioFormat};
use crate::backend::{AudioBackend, BackendError, CancellationToken, PlayOutcome, Playback};
use crate::metadata::read_track_info;
use crate::playback::{Controls, PlaybackState};
use crate::stream::{StreamPosition, TrackedFile};

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Could not play file: {0}")]
    Play(#[source] BackendError),
    #[error("Playback error: {0}")]
    Playback(String),
    #[error("Error during pause: {0}")]
    Pause(String),
    #[error("Resume failed: {0}")]
    Resume(#[source] BackendError),
}

/// The single message a playback worker sends before it exits.
#[derive(Debug)]
pub struct WorkerEvent {
    pub generation: u64,
    pub outcome: WorkerOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    Completed,
    Interrupted,
    Failed(String),
}

struct Worker {
    generation: u64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Worker {
    /// Signals the worker and waits for it to release its player.
    fn stop(self) -> thread::Result<()> {
        self.cancel.cancel();
        self.handle.join()
    }
}

/// Counts running workers; decremented when the worker thread drops it.
struct LiveWorker(Arc<AtomicUsize>);

impl LiveWorker {
    fn enter(count: &Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(count.clone())
    }
}

impl Drop for LiveWorker {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct Session {
    total_len: u64,
    /// Bytes left in the file when playback was paused.
    pause_offset: u64,
    position: StreamPosition,
    worker: Option<Worker>,
    /// Worker taken out by the last pause. It may have run to the end just
    /// before the pause reached it.
    paused_generation: Option<u64>,
}

/// Play/pause/stop state machine behind the windowed player.
///
/// Only the owning (control) thread mutates the session. Each playback
/// worker owns its player, stops when its cancellation token fires, closes
/// the player itself and reports exactly one [`WorkerEvent`] on the channel
/// returned by [`PlaybackController::take_events`]. Events carry the
/// generation of the worker that sent them so late reports from replaced
/// workers can be dropped.
pub struct PlaybackController<B: AudioBackend> {
    backend: B,
    selected: Option<AudioFile>,
    session: Option<Session>,
    state: PlaybackState,
    generation: u64,
    live_workers: Arc<AtomicUsize>,
    events_tx: UnboundedSender<WorkerEvent>,
    events_rx: Option<UnboundedReceiver<WorkerEvent>>,
}

impl<B: AudioBackend> PlaybackController<B> {
    pub fn new(backend: B) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded();

        Self {
            backend,
            selected: None,
            session: None,
            state: PlaybackState::Idle,
            generation: 0,
            live_workers: Arc::new(AtomicUsize::new(0)),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn selected_file(&self) -> Option<&AudioFile> {
        self.selected.as_ref()
    }

    pub fn controls(&self) -> Controls {
        Controls::new(self.state, self.selected.as_ref())
    }

    /// Remaining-bytes count captured by the last pause. Only set while
    /// paused.
    pub fn pause_offset(&self) -> Option<u64> {
        match (self.state, &self.session) {
            (PlaybackState::Paused, Some(session)) => Some(session.pause_offset),
            _ => None,
        }
    }

    pub fn live_workers(&self) -> usize {
        self.live_workers.load(Ordering::SeqCst)
    }

    /// Worker events, to be fed back into [`Self::handle_event`]. Can be
    /// taken once.
    pub fn take_events(&mut self) -> Option<UnboundedReceiver<WorkerEvent>> {
        self.events_rx.take()
    }

    /// Selects a file after the chooser was accepted. Any current playback
    /// is stopped.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<(), PlayerError> {
        let path = path.into();
        self.guard(move |this| {
            let format = AudioFormat::from_path(&path)
                .ok_or_else(|| PlayerError::UnsupportedFormat(path.clone()))?;
            if !path.is_file() {
                return Err(PlayerError::FileNotFound(path));
            }

            let info = match read_track_info(&path) {
                Ok(info) => Some(info),
                Err(e) => {
                    log::debug!("no track info for {}: {}", path.display(), e);
                    None
                }
            };

            this.release_session();
            log::info!("selected {}", path.display());
            this.selected = Some(AudioFile { path, format, info });
            this.state = PlaybackState::Ready;
            Ok(())
        })
    }

    /// Plays the selected file from the beginning.
    pub fn play(&mut self) -> Result<(), PlayerError> {
        let Some(path) = self.selected.as_ref().map(|file| file.path.clone()) else {
            log::debug!("play ignored, no file selected");
            return Ok(());
        };

        self.stop();
        self.guard(move |this| {
            let stream = TrackedFile::open(&path, 0).map_err(|e| PlayerError::Play(e.into()))?;
            let total_len = stream.total_len();
            let position = stream.position();

            let player = this.backend.open(stream).map_err(PlayerError::Play)?;
            let worker = this
                .spawn_worker(player)
                .map_err(|e| PlayerError::Play(e.into()))?;

            this.session = Some(Session {
                total_len,
                pause_offset: 0,
                position,
                worker: Some(worker),
                paused_generation: None,
            });
            this.state = PlaybackState::Playing;
            Ok(())
        })
    }

    /// The Pause/Resume button.
    pub fn toggle_pause(&mut self) -> Result<(), PlayerError> {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.resume(),
            _ => Ok(()),
        }
    }

    pub fn pause(&mut self) -> Result<(), PlayerError> {
        if self.state != PlaybackState::Playing {
            return Ok(());
        }

        self.guard(|this| {
            let Some(session) = this.session.as_mut() else {
                return Ok(());
            };

            session.pause_offset = session.total_len.saturating_sub(session.position.get());
            if let Some(worker) = session.worker.take() {
                session.paused_generation = Some(worker.generation);
                worker
                    .stop()
                    .map_err(|_| PlayerError::Pause("playback worker panicked".to_string()))?;
            }

            log::debug!("paused with {} bytes remaining", session.pause_offset);
            this.state = PlaybackState::Paused;
            Ok(())
        })
    }

    /// Restarts playback roughly where it was paused by skipping the bytes
    /// already consumed. The skip is not frame aligned, so the first frame
    /// after a resume may be cut.
    pub fn resume(&mut self) -> Result<(), PlayerError> {
        if self.state != PlaybackState::Paused {
            return Ok(());
        }
        let Some(path) = self.selected.as_ref().map(|file| file.path.clone()) else {
            return Ok(());
        };

        self.guard(move |this| {
            let Some(session) = this.session.as_ref() else {
                return Ok(());
            };
            let skip = session.total_len.saturating_sub(session.pause_offset);

            let stream =
                TrackedFile::open(&path, skip).map_err(|e| PlayerError::Resume(e.into()))?;
            let position = stream.position();

            let player = this.backend.open(stream).map_err(PlayerError::Resume)?;
            let worker = this
                .spawn_worker(player)
                .map_err(|e| PlayerError::Resume(e.into()))?;

            if let Some(session) = this.session.as_mut() {
                session.position = position;
                session.worker = Some(worker);
                session.paused_generation = None;
            }
            log::debug!("resumed at byte {}", skip);
            this.state = PlaybackState::Playing;
            Ok(())
        })
    }

    /// Releases any session. Does nothing harmful when nothing is playing.
    pub fn stop(&mut self) {
        self.release_session();
        self.state = if self.selected.is_some() {
            PlaybackState::Stopped
        } else {
            PlaybackState::Idle
        };
    }

    /// Applies a worker's terminal report. Returns the error to show the
    /// user when the worker failed.
    pub fn handle_event(&mut self, event: WorkerEvent) -> Option<PlayerError> {
        let current = self.session.as_ref().and_then(|session| match self.state {
            PlaybackState::Paused => session.paused_generation,
            _ => session.worker.as_ref().map(|worker| worker.generation),
        });

        if current != Some(event.generation) {
            log::debug!(
                "ignoring {:?} from stale worker {}",
                event.outcome,
                event.generation
            );
            return None;
        }

        match event.outcome {
            WorkerOutcome::Completed => {
                self.release_session();
                self.state = PlaybackState::Finished;
                None
            }
            WorkerOutcome::Interrupted => None,
            WorkerOutcome::Failed(message) => {
                let error = PlayerError::Playback(message);
                log::error!("{}", error);
                self.release_session();
                self.state = PlaybackState::Error;
                Some(error)
            }
        }
    }

    fn spawn_worker(&mut self, mut player: B::Player) -> io::Result<Worker> {
        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let events = self.events_tx.clone();
        let live = LiveWorker::enter(&self.live_workers);

        let handle = thread::Builder::new()
            .name(format!("playback-worker-{}", generation))
            .spawn(move || {
                let _live = live;
                log::debug!("worker {} started", generation);

                let outcome = match player.play(&token) {
                    Ok(PlayOutcome::Completed) => WorkerOutcome::Completed,
                    Ok(PlayOutcome::Interrupted) => WorkerOutcome::Interrupted,
                    Err(e) => WorkerOutcome::Failed(e.to_string()),
                };
                player.close();

                log::debug!("worker {} finished: {:?}", generation, outcome);
                let _ = events.unbounded_send(WorkerEvent {
                    generation,
                    outcome,
                });
            })?;

        Ok(Worker {
            generation,
            cancel,
            handle,
        })
    }

    fn release_session(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if let Some(worker) = session.worker.take() {
            let generation = worker.generation;
            if worker.stop().is_err() {
                log::warn!("worker {} panicked while stopping", generation);
            }
        }
    }

    fn guard<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, PlayerError>,
    ) -> Result<T, PlayerError> {
        let result = op(self);
        if let Err(e) = &result {
            log::error!("{}", e);
            self.release_session();
            self.state = PlaybackState::Error;
        }
        result
    }
}

impl<B: AudioBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        self.release_session();
    }
}
