use futures::StreamExt;
use gpui::prelude::*;
use gpui::*;
use player_core::{
    AudioFormat, PlaybackController, PlayerError, RodioBackend, Settings, WorkerEvent,
};
use ui::{button, StatusPanel};

const WINDOW_TITLE: &str = "Simple Music Player";

struct Player {
    controller: PlaybackController<RodioBackend>,
    settings: Settings,
    _worker_events: Task<()>,
}

impl Player {
    fn new(settings: Settings, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let mut controller = PlaybackController::new(RodioBackend::new(&settings));
        let events = controller.take_events();

        let worker_events = cx.spawn_in(window, async move |this, cx| {
            let Some(mut events) = events else {
                return;
            };
            while let Some(event) = events.next().await {
                let delivered = this.update_in(cx, |this, window, cx| {
                    this.handle_worker_event(event, window, cx);
                });
                if delivered.is_err() {
                    break;
                }
            }
        });

        Player {
            controller,
            settings,
            _worker_events: worker_events,
        }
    }

    fn handle_worker_event(&mut self, event: WorkerEvent, window: &mut Window, cx: &mut Context<Self>) {
        if let Some(error) = self.controller.handle_event(event) {
            self.show_error(&error, window, cx);
        }
        cx.notify();
    }

    fn open_file(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let format = AudioFormat::Mp3;
        let mut dialog = rfd::AsyncFileDialog::new()
            .set_title("Open")
            .add_filter(format.filter_name(), &[format.extension()]);
        if let Some(dir) = &self.settings.start_dir {
            dialog = dialog.set_directory(dir);
        }

        cx.spawn_in(window, async move |this, cx| {
            let Some(file) = dialog.pick_file().await else {
                log::debug!("file chooser cancelled");
                return;
            };
            let path = file.path().to_path_buf();

            let _ = this.update_in(cx, |this, window, cx| {
                let result = this.controller.open(path);
                this.report(result, window, cx);
            });
        })
        .detach();
    }

    fn play(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let result = self.controller.play();
        self.report(result, window, cx);
    }

    fn toggle_pause(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let result = self.controller.toggle_pause();
        self.report(result, window, cx);
    }

    fn stop(&mut self, cx: &mut Context<Self>) {
        self.controller.stop();
        cx.notify();
    }

    fn report(&mut self, result: Result<(), PlayerError>, window: &mut Window, cx: &mut Context<Self>) {
        if let Err(error) = result {
            self.show_error(&error, window, cx);
        }
        cx.notify();
    }

    fn show_error(&mut self, error: &PlayerError, window: &mut Window, cx: &mut Context<Self>) {
        let message = error.to_string();
        let answer = window.prompt(PromptLevel::Critical, "Error", Some(&message), &["OK"], cx);
        cx.spawn(async move |_this, _cx| {
            answer.await.ok();
        })
        .detach();
    }
}

impl Render for Player {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let controls = self.controller.controls();

        div()
            .flex()
            .flex_col()
            .size_full()
            .bg(rgb(0x1e1e1e))
            .child(
                div()
                    .flex_1()
                    .child(StatusPanel::new(controls.file_label, controls.status_label)),
            )
            .child(
                div()
                    .flex()
                    .justify_center()
                    .gap_2()
                    .py_2()
                    .child(
                        button("open", "Open")
                            .disabled(!controls.open_enabled)
                            .on_click(cx.listener(|this, _event, window, cx| {
                                this.open_file(window, cx);
                            })),
                    )
                    .child(
                        button("play", "Play")
                            .disabled(!controls.play_enabled)
                            .on_click(cx.listener(|this, _event, window, cx| {
                                this.play(window, cx);
                            })),
                    )
                    .child(
                        button("pause", controls.pause_label.as_str())
                            .disabled(!controls.pause_enabled)
                            .on_click(cx.listener(|this, _event, window, cx| {
                                this.toggle_pause(window, cx);
                            })),
                    )
                    .child(
                        button("stop", "Stop")
                            .disabled(!controls.stop_enabled)
                            .on_click(cx.listener(|this, _event, _window, cx| {
                                this.stop(cx);
                            })),
                    ),
            )
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let settings = Settings::load();

    Application::new().run(move |cx: &mut App| {
        let bounds = Bounds::centered(
            None,
            size(px(settings.window_width), px(settings.window_height)),
            cx,
        );
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some(WINDOW_TITLE.into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        if let Err(e) = cx.open_window(options, |window, cx| {
            cx.new(|cx| Player::new(settings, window, cx))
        }) {
            log::error!("failed to open window: {}", e);
            cx.quit();
            return;
        }

        cx.on_window_closed(|cx| cx.quit()).detach();
        cx.activate(true);
    });
}
