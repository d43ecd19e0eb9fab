use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::sync::Arc;
use tracing::{error, info};

use imagenet_classifier::config::AppConfig;
use imagenet_classifier::imaging::loader::SUPPORTED_EXTENSIONS;
use imagenet_classifier::inference::Classifier;
use imagenet_classifier::pipeline;
use imagenet_classifier::runtime::{Runtime, Variant};
use imagenet_classifier::state::session::{GridReply, GridSession};
use imagenet_classifier::ui::{overview, preview};

/// Main application state
struct GridClassifier {
    config: AppConfig,
    classifier: Arc<dyn Classifier>,
    /// Grid size text as typed, parsed only when an upload starts
    grid_text: String,
    session: GridSession,
    /// Widget handles for the current batch, rebuilt when a batch lands
    source: Option<Handle>,
    cell_handles: Vec<Handle>,
    cell_labels: Vec<String>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User edited the grid size field
    GridTextChanged(String),
    /// User clicked "Upload Grid Image"
    UploadImage,
    /// Background classification finished
    ClassificationComplete(GridReply),
    /// User clicked "Previous"
    Previous,
    /// User clicked "Next"
    Next,
}

impl GridClassifier {
    fn new(runtime: Runtime) -> (Self, Task<Message>) {
        let grid_text = runtime.config.default_grid.clone();
        (
            GridClassifier {
                config: runtime.config,
                classifier: runtime.classifier,
                grid_text,
                session: GridSession::default(),
                source: None,
                cell_handles: Vec::new(),
                cell_labels: Vec::new(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::GridTextChanged(value) => {
                self.grid_text = value;
                Task::none()
            }
            Message::UploadImage => {
                if self.session.is_busy() {
                    return Task::none();
                }

                let mut dialog = FileDialog::new()
                    .set_title("Open Image File")
                    .add_filter("Image files", &SUPPORTED_EXTENSIONS);
                if let Some(dir) = &self.config.dialog_directory {
                    dialog = dialog.set_directory(dir);
                }

                let Some(path) = dialog.pick_file() else {
                    return Task::none();
                };

                info!("📂 Selected {} with grid {}", path.display(), self.grid_text);
                if !self.session.start(&self.grid_text) {
                    return Task::none();
                }

                let classifier = Arc::clone(&self.classifier);
                Task::perform(
                    pipeline::classify_grid(path, self.grid_text.clone(), classifier),
                    |result| {
                        Message::ClassificationComplete(result.map(Arc::new).map_err(Arc::new))
                    },
                )
            }
            Message::ClassificationComplete(reply) => {
                self.session.finish(reply);
                self.refresh_handles();
                Task::none()
            }
            Message::Previous => {
                self.session.previous();
                Task::none()
            }
            Message::Next => {
                self.session.next();
                Task::none()
            }
        }
    }

    /// Rebuild image handles from the session's batch, or drop them
    fn refresh_handles(&mut self) {
        match self.session.outcome() {
            Some(outcome) => {
                self.source = Some(preview::bitmap_handle(&outcome.source));
                self.cell_handles = outcome
                    .results
                    .iter()
                    .map(|r| preview::bitmap_handle(r.bitmap()))
                    .collect();
                self.cell_labels = outcome.results.labels().map(str::to_string).collect();
            }
            None => {
                self.source = None;
                self.cell_handles.clear();
                self.cell_labels.clear();
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let nav = self.session.nav_state();

        let upload = button("Upload Grid Image")
            .on_press_maybe((!self.session.is_busy()).then_some(Message::UploadImage))
            .padding(10);

        let grid_input = row![
            text("Grid size:"),
            text_input("e.g. 3x3", &self.grid_text)
                .on_input(Message::GridTextChanged)
                .width(120.0),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        let navigation = row![
            button("Previous").on_press_maybe(nav.can_previous().then_some(Message::Previous)),
            button("Next").on_press_maybe(nav.can_next().then_some(Message::Next)),
        ]
        .spacing(20);

        let mut content: Column<Message> = column![upload, grid_input]
            .spacing(16)
            .padding(30)
            .align_x(Alignment::Center);

        content = content
            .push_maybe(
                self.source
                    .as_ref()
                    .map(|handle| preview::preview(handle, self.config.grid_preview_size)),
            )
            .push(text(self.session.status()).size(16))
            .push(text(self.session.time_text()).size(14))
            .push(navigation);

        if let Some((index, result)) = self.session.current() {
            if let Some(handle) = self.cell_handles.get(index) {
                content = content
                    .push(preview::preview(handle, self.config.tile_preview_size))
                    .push(text(format!("Cell {}: {}", index + 1, result.label())).size(16));
            }
        }

        if let Some(outcome) = self.session.outcome() {
            content = content.push(overview::overview(
                &self.cell_handles,
                &self.cell_labels,
                outcome.grid.cols as usize,
                self.session.cursor(),
            ));
        }

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    imagenet_classifier::init_logging();

    // Categories and network load before the window accepts any action
    let runtime = match Runtime::init(Variant::Grid) {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("❌ Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    iced::application(
        "ResNet50 Grid Image Classifier",
        GridClassifier::update,
        GridClassifier::view,
    )
    .theme(GridClassifier::theme)
    .window_size((500.0, 700.0))
    .centered()
    .run_with(move || GridClassifier::new(runtime))
}
