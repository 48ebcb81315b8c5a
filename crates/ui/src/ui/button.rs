use gpui::{div, prelude::*, rgb, App, ClickEvent, ElementId, IntoElement, SharedString, Window};

type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    label: SharedString,
    disabled: bool,
    on_click: Option<ClickHandler>,
}

pub fn button(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Button {
    Button {
        id: id.into(),
        label: label.into(),
        disabled: false,
        on_click: None,
    }
}

impl Button {
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Not called while the button is disabled.
    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for Button {
    fn render(self, _window: &mut Window, _cx: &mut App) -> impl IntoElement {
        let disabled = self.disabled;
        let handler = self.on_click.filter(|_| !disabled);

        div()
            .id(self.id)
            .px_3()
            .py_1()
            .rounded_md()
            .border_1()
            .border_color(rgb(0x555555))
            .bg(rgb(0x2a2a2a))
            .text_sm()
            .text_color(if disabled {
                rgb(0x666666)
            } else {
                rgb(0xffffff)
            })
            .child(self.label)
            .when(!disabled, |this| {
                this.cursor_pointer()
                    .hover(|style| style.bg(rgb(0x3a3a3a)))
            })
            .when_some(handler, |this, handler| {
                this.on_click(move |event, window, cx| handler(event, window, cx))
            })
    }
}
