use iced::widget::image::Handle;
use iced::widget::{button, column, container, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::sync::Arc;
use tracing::{error, info, warn};

use imagenet_classifier::config::AppConfig;
use imagenet_classifier::imaging::loader::SUPPORTED_EXTENSIONS;
use imagenet_classifier::inference::Classifier;
use imagenet_classifier::pipeline::{self, ImageOutcome};
use imagenet_classifier::runtime::{Runtime, Variant};
use imagenet_classifier::ui::preview;
use imagenet_classifier::ClassifierError;

/// Main application state
struct SimpleClassifier {
    config: AppConfig,
    classifier: Arc<dyn Classifier>,
    busy: bool,
    /// Prediction, progress, or error text
    status: String,
    source: Option<Handle>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Upload Image"
    UploadImage,
    /// Background classification finished
    ClassificationComplete(Result<Arc<ImageOutcome>, Arc<ClassifierError>>),
}

impl SimpleClassifier {
    fn new(runtime: Runtime) -> (Self, Task<Message>) {
        (
            SimpleClassifier {
                config: runtime.config,
                classifier: runtime.classifier,
                busy: false,
                status: "Upload an image to see the classification result".to_string(),
                source: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UploadImage => {
                if self.busy {
                    return Task::none();
                }

                let mut dialog = FileDialog::new()
                    .set_title("Open Image File")
                    .add_filter("Image files", &SUPPORTED_EXTENSIONS);
                if let Some(dir) = &self.config.dialog_directory {
                    dialog = dialog.set_directory(dir);
                }

                if let Some(path) = dialog.pick_file() {
                    info!("📂 Selected {}", path.display());
                    self.busy = true;
                    self.status = "Classifying...".to_string();

                    return Task::perform(
                        pipeline::classify_image(path, Arc::clone(&self.classifier)),
                        |result| {
                            Message::ClassificationComplete(result.map(Arc::new).map_err(Arc::new))
                        },
                    );
                }

                Task::none()
            }
            Message::ClassificationComplete(result) => {
                self.busy = false;
                match result {
                    Ok(outcome) => {
                        self.source = Some(preview::bitmap_handle(&outcome.source));
                        self.status = format!(
                            "Predicted class: {} ({:.1}%)",
                            outcome.prediction.label,
                            outcome.prediction.confidence * 100.0
                        );
                    }
                    Err(e) => {
                        warn!("⚠️  {}", e);
                        self.source = None;
                        self.status = format!("Error processing image: {}", e);
                    }
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content: Column<Message> = column![button("Upload Image")
            .on_press_maybe((!self.busy).then_some(Message::UploadImage))
            .padding(10)]
        .push_maybe(
            self.source
                .as_ref()
                .map(|handle| preview::preview(handle, self.config.simple_preview_size)),
        )
        .push(text(&self.status).size(16))
        .spacing(20)
        .padding(30)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
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
    let runtime = match Runtime::init(Variant::Simple) {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("❌ Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    iced::application(
        "ResNet50 Image Classifier",
        SimpleClassifier::update,
        SimpleClassifier::view,
    )
    .theme(SimpleClassifier::theme)
    .window_size((400.0, 400.0))
    .centered()
    .run_with(move || SimpleClassifier::new(runtime))
}
