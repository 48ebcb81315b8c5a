mod button;
mod status_panel;

pub use button::*;
pub use status_panel::*;
