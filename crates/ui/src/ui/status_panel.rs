use gpui::{div, prelude::*, rgb, App, IntoElement, SharedString, Window};

/// The two read-only lines above the transport buttons.
#[derive(IntoElement)]
pub struct StatusPanel {
    file_label: SharedString,
    status_label: SharedString,
}

impl StatusPanel {
    pub fn new(file_label: impl Into<SharedString>, status_label: impl Into<SharedString>) -> Self {
        Self {
            file_label: file_label.into(),
            status_label: status_label.into(),
        }
    }
}

impl RenderOnce for StatusPanel {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap_1()
            .px_3()
            .py_2()
            .child(
                div()
                    .text_sm()
                    .text_color(rgb(0xffffff))
                    .child(self.file_label),
            )
            .child(
                div()
                    .text_xs()
                    .text_color(rgb(0x888888))
                    .child(self.status_label),
            )
    }
}
