/// Pretrained network wrapper
///
/// The rest of the crate only sees the `Classifier` trait: bitmap in,
/// `Prediction` out. `OnnxClassifier` is the real backend, running an ONNX
/// export of the network through tract.

use image::RgbImage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use tract_onnx::prelude::*;

use super::labels::CategoryList;
use crate::error::{ClassifierError, Result};
use crate::imaging::preprocess::Preprocessor;

/// Top-1 result for one image
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Output class index
    pub index: usize,
    /// Category name for `index`
    pub label: String,
    /// Softmax probability of the winning class
    pub confidence: f32,
}

/// Opaque image classifier
pub trait Classifier: Send + Sync {
    fn classify(&self, bitmap: &RgbImage) -> Result<Prediction>;
}

/// Pick the highest score (lowest index wins ties) and its softmax probability.
///
/// NaN scores never win.
pub fn top_prediction(scores: &[f32], categories: &CategoryList) -> Result<Prediction> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }

    let (index, top) = best.ok_or_else(|| {
        ClassifierError::Inference("network produced no usable scores".to_string())
    })?;

    let sum: f32 = scores
        .iter()
        .filter(|s| !s.is_nan())
        .map(|&s| (s - top).exp())
        .sum();

    let label = categories.get(index).ok_or_else(|| {
        ClassifierError::config(format!(
            "class {} has no entry in the category list ({} entries)",
            index,
            categories.len()
        ))
    })?;

    Ok(Prediction {
        index,
        label: label.to_string(),
        confidence: 1.0 / sum,
    })
}

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// ResNet-style ImageNet classifier backed by an ONNX model
pub struct OnnxClassifier {
    model: Arc<OnnxPlan>,
    categories: Arc<CategoryList>,
    preprocessor: Preprocessor,
}

impl OnnxClassifier {
    /// Load and optimize the network, then check that the category list has
    /// exactly one entry per output class
    pub fn load(
        model_path: &Path,
        categories: CategoryList,
        preprocessor: Preprocessor,
    ) -> Result<Self> {
        let size = preprocessor.input_size() as usize;
        let model_error = |e: TractError| ClassifierError::ModelLoad {
            path: model_path.to_path_buf(),
            message: format!("{:#}", e),
        };

        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, 3, size, size]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(model_error)?;

        let classes = model
            .model()
            .output_fact(0)
            .map_err(model_error)?
            .shape
            .as_concrete()
            .and_then(|dims| dims.last().copied());
        match classes {
            Some(classes) => categories.ensure_matches(classes)?,
            None => debug!("Output shape is symbolic, checking label count at inference time"),
        }

        info!(
            "🧠 Loaded model {} ({} classes, {}px input)",
            model_path.display(),
            categories.len(),
            size
        );

        Ok(Self {
            model: Arc::new(model),
            categories: Arc::new(categories),
            preprocessor,
        })
    }

    fn scores(&self, bitmap: &RgbImage) -> TractResult<Vec<f32>> {
        let input: Tensor = self.preprocessor.to_tensor(bitmap).into();
        let outputs = self.model.run(tvec!(input.into()))?;
        let scores = outputs[0].to_array_view::<f32>()?.iter().copied().collect();
        Ok(scores)
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, bitmap: &RgbImage) -> Result<Prediction> {
        let scores = self
            .scores(bitmap)
            .map_err(|e| ClassifierError::Inference(format!("{:#}", e)))?;
        self.categories.ensure_matches(scores.len())?;

        let prediction = top_prediction(&scores, &self.categories)?;
        debug!(
            "{}x{} -> {} ({:.1}%)",
            bitmap.width(),
            bitmap.height(),
            prediction.label,
            prediction.confidence * 100.0
        );
        Ok(prediction)
    }
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("categories", &self.categories.len())
            .field("preprocessor", &self.preprocessor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategoryList {
        CategoryList::from_names(["tench", "goldfish", "shark", "hen"])
    }

    #[test]
    fn test_top_prediction_picks_max() {
        let p = top_prediction(&[0.1, 3.0, -2.0, 1.0], &categories()).unwrap();
        assert_eq!(p.index, 1);
        assert_eq!(p.label, "goldfish");
        assert!(p.confidence > 0.5 && p.confidence < 1.0);
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let p = top_prediction(&[1.0, 5.0, 5.0, 5.0], &categories()).unwrap();
        assert_eq!(p.index, 1);
    }

    #[test]
    fn test_uniform_scores_split_confidence() {
        let p = top_prediction(&[2.0, 2.0, 2.0, 2.0], &categories()).unwrap();
        assert_eq!(p.index, 0);
        assert!((p.confidence - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_nan_scores_ignored() {
        let p = top_prediction(&[f32::NAN, 0.5, f32::NAN, 0.7], &categories()).unwrap();
        assert_eq!(p.label, "hen");
    }

    #[test]
    fn test_all_nan_is_inference_error() {
        let err = top_prediction(&[f32::NAN; 4], &categories()).unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(_)));
        assert!(top_prediction(&[], &categories()).is_err());
    }

    #[test]
    fn test_index_beyond_labels_is_config_error() {
        let err = top_prediction(&[0.0, 0.0, 0.0, 0.0, 9.0], &categories()).unwrap_err();
        assert!(matches!(err, ClassifierError::Config { .. }));
    }

    #[test]
    fn test_missing_model_file() {
        let err = OnnxClassifier::load(
            Path::new("/nonexistent/resnet50.onnx"),
            categories(),
            Preprocessor::exact(224),
        )
        .unwrap_err();
        assert!(matches!(err, ClassifierError::ModelLoad { .. }));
    }
}
