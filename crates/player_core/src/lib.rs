pub mod audio;
pub mod audio_player;
pub mod backend;
pub mod console;
pub mod controller;
pub mod metadata;
pub mod playback;
pub mod settings;
pub mod stream;

pub use audio::*;
pub use audio_player::*;
pub use backend::*;
pub use controller::*;
pub use metadata::*;
pub use playback::*;
pub use settings::*;
pub use stream::*;
