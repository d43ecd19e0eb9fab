/// Error types shared by both classifier windows
///
/// Every failure a user action can hit ends up as a `ClassifierError`,
/// which the window renders as a single line of text. Startup failures
/// (config, labels, model) use the same type but stop the process.

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The selected file could not be opened or decoded as an image
    #[error("cannot open image {}: {source}", .path.display())]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The selected file does not carry one of the accepted image extensions
    #[error("unsupported image type: {}", .path.display())]
    UnsupportedExtension { path: PathBuf },

    /// Grid text was not `<rows>x<cols>` with positive values that fit the image
    #[error("invalid grid size {input:?}: {reason}")]
    InvalidGridSpec { input: String, reason: String },

    /// A tile failed to classify; the whole batch is discarded
    #[error("classification failed for cell {}: {source}", .index + 1)]
    ClassificationFailed {
        index: usize,
        #[source]
        source: Box<ClassifierError>,
    },

    /// The network itself raised during a forward pass
    #[error("inference: {0}")]
    Inference(String),

    /// Configuration is unusable (bad JSON, label count mismatch, ...)
    #[error("configuration: {message}")]
    Config { message: String },

    /// The ONNX model could not be loaded or optimized
    #[error("cannot load model {}: {message}", .path.display())]
    ModelLoad { path: PathBuf, message: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking worker running an action was cancelled or panicked
    #[error("worker: {0}")]
    Worker(String),
}

impl ClassifierError {
    pub(crate) fn invalid_grid(input: &str, reason: impl Into<String>) -> Self {
        ClassifierError::InvalidGridSpec {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        ClassifierError::Config {
            message: message.into(),
        }
    }
}
