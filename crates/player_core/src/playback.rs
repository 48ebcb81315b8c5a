use crate::audio::AudioFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Ready,
    Playing,
    Paused,
    Stopped,
    /// Playback ran to the end on its own.
    Finished,
    Error,
}

impl PlaybackState {
    /// States in which a selected file can be played from the start and
    /// nothing is in flight.
    pub fn is_ready(self) -> bool {
        matches!(
            self,
            PlaybackState::Ready | PlaybackState::Stopped | PlaybackState::Finished
        )
    }

    pub fn status_text(self) -> &'static str {
        match self {
            PlaybackState::Idle => "Status: Idle",
            PlaybackState::Ready => "Status: Ready",
            PlaybackState::Playing => "Status: Playing...",
            PlaybackState::Paused => "Status: Paused",
            PlaybackState::Stopped => "Status: Stopped",
            PlaybackState::Finished => "Status: Finished",
            PlaybackState::Error => "Status: Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseLabel {
    Pause,
    Resume,
}

impl PauseLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PauseLabel::Pause => "Pause",
            PauseLabel::Resume => "Resume",
        }
    }
}

/// What the control surface should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub open_enabled: bool,
    pub play_enabled: bool,
    pub pause_enabled: bool,
    pub stop_enabled: bool,
    pub pause_label: PauseLabel,
    pub file_label: String,
    pub status_label: &'static str,
}

impl Controls {
    pub fn new(state: PlaybackState, file: Option<&AudioFile>) -> Self {
        let has_file = file.is_some();
        let (play_enabled, pause_enabled, stop_enabled) = match state {
            PlaybackState::Playing | PlaybackState::Paused => (false, true, true),
            _ => (has_file, false, false),
        };

        Self {
            open_enabled: true,
            play_enabled,
            pause_enabled,
            stop_enabled,
            pause_label: if state == PlaybackState::Paused {
                PauseLabel::Resume
            } else {
                PauseLabel::Pause
            },
            file_label: file_label(file),
            status_label: state.status_text(),
        }
    }
}

fn file_label(file: Option<&AudioFile>) -> String {
    let Some(file) = file else {
        return "No file selected.".to_string();
    };

    match file.info.as_ref().and_then(|info| info.display_name()) {
        Some(name) => format!("Loaded: {} ({})", file.file_name(), name),
        None => format!("Loaded: {}", file.file_name()),
    }
}
