use std::io::BufReader;
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::backend::{AudioBackend, BackendError, CancellationToken, PlayOutcome, Playback};
use crate::settings::Settings;
use crate::stream::TrackedFile;

/// [`AudioBackend`] on top of rodio's symphonia MP3 decoder.
///
/// The output stream is not `Send`, so it stays with whoever owns the
/// backend. It is opened on the first [`AudioBackend::open`] call, which
/// keeps a missing audio device out of the way until something is played.
pub struct RodioBackend {
    output: Option<(OutputStream, OutputStreamHandle)>,
    volume: f32,
    poll_interval: Duration,
}

impl RodioBackend {
    pub fn new(settings: &Settings) -> Self {
        Self {
            output: None,
            volume: settings.volume(),
            poll_interval: settings.poll_interval(),
        }
    }

    fn stream_handle(&mut self) -> Result<&OutputStreamHandle, BackendError> {
        if self.output.is_none() {
            let output = OutputStream::try_default()
                .map_err(|e| BackendError::OutputStream(e.to_string()))?;
            log::debug!("opened default audio output");
            self.output = Some(output);
        }

        match &self.output {
            Some((_, handle)) => Ok(handle),
            None => Err(BackendError::OutputStream("no output stream".to_string())),
        }
    }
}

impl AudioBackend for RodioBackend {
    type Player = RodioPlayback;

    fn open(&mut self, stream: TrackedFile) -> Result<RodioPlayback, BackendError> {
        let volume = self.volume;
        let poll_interval = self.poll_interval;

        // Decoding the header needs no output device.
        let source = Decoder::new(BufReader::new(stream))
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        let handle = self.stream_handle()?;

        let sink = Sink::try_new(handle).map_err(|e| BackendError::Sink(e.to_string()))?;

        // Nothing is audible until the worker calls `play`.
        sink.pause();
        sink.set_volume(volume);
        sink.append(source);

        Ok(RodioPlayback {
            sink: Some(sink),
            poll_interval,
        })
    }
}

pub struct RodioPlayback {
    sink: Option<Sink>,
    poll_interval: Duration,
}

impl Playback for RodioPlayback {
    fn play(&mut self, cancel: &CancellationToken) -> Result<PlayOutcome, BackendError> {
        let Some(sink) = &self.sink else {
            return Err(BackendError::Sink("player already closed".to_string()));
        };

        sink.play();
        loop {
            if cancel.is_cancelled() {
                sink.stop();
                return Ok(PlayOutcome::Interrupted);
            }
            if sink.empty() {
                return Ok(PlayOutcome::Completed);
            }
            thread::sleep(self.poll_interval);
        }
    }

    fn close(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
