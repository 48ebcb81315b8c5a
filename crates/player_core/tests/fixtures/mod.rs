#![allow(dead_code)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use player_core::{AudioBackend, BackendError, CancellationToken, PlayOutcome, Playback, TrackedFile};

pub const FIXTURE_LEN: usize = 4096;

/// How much a fake decoder pulls from its stream when it is built.
pub const READ_AHEAD: usize = 512;

/// Writes a file of recognisable bytes: byte `i` is `i % 251`.
pub fn write_fixture(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let bytes: Vec<u8> = (0..FIXTURE_LEN).map(|i| (i % 251) as u8).collect();
    std::fs::write(&path, bytes).unwrap();
    path
}

pub fn mp3_fixture(dir: &Path) -> PathBuf {
    write_fixture(dir, "song.mp3")
}

/// Shared view into every player a [`FakeBackend`] hands out.
#[derive(Debug, Default)]
pub struct Recorder {
    pub opens: AtomicUsize,
    pub closes: AtomicUsize,
    pub playing: AtomicUsize,
    pub max_playing: AtomicUsize,
    pub finish: AtomicBool,
    pub fail_open: Mutex<Option<String>>,
    pub fail_play: Mutex<Option<String>>,
    pub skips: Mutex<Vec<u64>>,
    pub first_bytes: Mutex<Vec<u8>>,
}

pub struct FakeBackend {
    pub recorder: Arc<Recorder>,
}

impl FakeBackend {
    pub fn new() -> (Self, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (
            Self {
                recorder: recorder.clone(),
            },
            recorder,
        )
    }
}

impl AudioBackend for FakeBackend {
    type Player = FakePlayback;

    fn open(&mut self, mut stream: TrackedFile) -> Result<FakePlayback, BackendError> {
        self.recorder.opens.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.recorder.fail_open.lock().unwrap().clone() {
            return Err(BackendError::Decode(message));
        }

        self.recorder.skips.lock().unwrap().push(stream.skip());

        let mut head = Vec::new();
        (&mut stream).take(READ_AHEAD as u64).read_to_end(&mut head)?;
        if let Some(first) = head.first() {
            self.recorder.first_bytes.lock().unwrap().push(*first);
        }

        Ok(FakePlayback {
            recorder: self.recorder.clone(),
            _stream: stream,
            closed: false,
        })
    }
}

pub struct FakePlayback {
    recorder: Arc<Recorder>,
    _stream: TrackedFile,
    closed: bool,
}

impl Playback for FakePlayback {
    fn play(&mut self, cancel: &CancellationToken) -> Result<PlayOutcome, BackendError> {
        let playing = self.recorder.playing.fetch_add(1, Ordering::SeqCst) + 1;
        self.recorder.max_playing.fetch_max(playing, Ordering::SeqCst);

        let result = loop {
            if cancel.is_cancelled() {
                break Ok(PlayOutcome::Interrupted);
            }
            if let Some(message) = self.recorder.fail_play.lock().unwrap().clone() {
                break Err(BackendError::Decode(message));
            }
            if self.recorder.finish.load(Ordering::SeqCst) {
                break Ok(PlayOutcome::Completed);
            }
            thread::sleep(Duration::from_millis(1));
        };

        self.recorder.playing.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.recorder.closes.fetch_add(1, Ordering::SeqCst);
        }
    }
}
