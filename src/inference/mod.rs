/// Network inference module
///
/// - `labels.rs` - the ordered ImageNet category list
/// - `model.rs` - the `Classifier` trait and the ONNX backend

pub mod labels;
pub mod model;

pub use model::{Classifier, OnnxClassifier, Prediction};
