/// Startup wiring
///
/// Both windows need the same things before the first click: config,
/// category list, and the loaded network. `Runtime::init` builds them in
/// that order and nothing is reloaded afterwards.

use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::imaging::preprocess::Preprocessor;
use crate::inference::labels::CategoryList;
use crate::inference::model::{Classifier, OnnxClassifier};

/// Which window the runtime is for; decides the input pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Whole image: shorter-side resize then center crop
    Simple,
    /// Grid cells: straight resize to the input square
    Grid,
}

impl Variant {
    pub fn preprocessor(self, config: &AppConfig) -> Preprocessor {
        match self {
            Variant::Simple => {
                Preprocessor::center_crop(config.input_size, config.resize_shorter_side)
            }
            Variant::Grid => Preprocessor::exact(config.input_size),
        }
    }
}

pub struct Runtime {
    pub config: AppConfig,
    pub classifier: Arc<dyn Classifier>,
}

impl Runtime {
    /// Load config from the user's config directory, then labels, then model
    pub fn init(variant: Variant) -> Result<Self> {
        let config = AppConfig::load()?;
        Self::with_config(config, variant)
    }

    pub fn with_config(config: AppConfig, variant: Variant) -> Result<Self> {
        let categories = CategoryList::load(&config.labels_path)?;
        let classifier =
            OnnxClassifier::load(&config.model_path, categories, variant.preprocessor(&config))?;

        info!("🎨 {:?} classifier ready", variant);

        Ok(Self {
            config,
            classifier: Arc::new(classifier),
        })
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime").field("config", &self.config).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;
    use crate::imaging::preprocess::ResizeMode;
    use std::path::PathBuf;

    #[test]
    fn test_variant_pipelines() {
        let config = AppConfig::default();
        assert_eq!(
            Variant::Simple.preprocessor(&config).mode(),
            ResizeMode::CenterCrop { shorter_side: 256 }
        );
        assert_eq!(Variant::Grid.preprocessor(&config).mode(), ResizeMode::Exact);
        assert_eq!(Variant::Grid.preprocessor(&config).input_size(), 224);
    }

    #[test]
    fn test_missing_labels_stop_startup() {
        let config = AppConfig {
            labels_path: PathBuf::from("/nonexistent/imagenet_classes.txt"),
            ..AppConfig::default()
        };
        let err = Runtime::with_config(config, Variant::Grid).unwrap_err();
        assert!(matches!(err, ClassifierError::Io { .. }));
    }
}
