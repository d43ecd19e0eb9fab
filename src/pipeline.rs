/// Upload-and-classify actions
///
/// Each user upload runs one of these chains to completion:
/// - whole image: load -> preprocess -> classify
/// - grid: load -> parse grid -> tile -> classify every tile -> count labels
///
/// The async wrappers move the blocking chain onto tokio's blocking pool so
/// the window keeps repainting while the network runs.

use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::info;

use crate::error::{ClassifierError, Result};
use crate::imaging::grid::{self, GridSpec};
use crate::imaging::loader;
use crate::inference::model::{Classifier, Prediction};
use crate::state::results::{classify_all, label_frequency, ResultSet};

/// Result of classifying one whole image
#[derive(Debug, Clone)]
pub struct ImageOutcome {
    pub path: PathBuf,
    pub source: RgbImage,
    pub prediction: Prediction,
}

/// Result of classifying an image cell by cell
#[derive(Debug, Clone)]
pub struct GridOutcome {
    pub path: PathBuf,
    pub source: RgbImage,
    pub grid: GridSpec,
    pub results: ResultSet,
    /// Label counts, most common first
    pub frequency: Vec<(String, usize)>,
    /// Wall-clock time spent tiling and classifying
    pub elapsed: Duration,
}

/// Classify a whole image
pub async fn classify_image(
    path: PathBuf,
    classifier: Arc<dyn Classifier>,
) -> Result<ImageOutcome> {
    task::spawn_blocking(move || classify_image_blocking(&path, classifier.as_ref()))
        .await
        .map_err(|e| ClassifierError::Worker(e.to_string()))?
}

/// Classify an image split into the grid described by `grid_text`
pub async fn classify_grid(
    path: PathBuf,
    grid_text: String,
    classifier: Arc<dyn Classifier>,
) -> Result<GridOutcome> {
    task::spawn_blocking(move || classify_grid_blocking(&path, &grid_text, classifier.as_ref()))
        .await
        .map_err(|e| ClassifierError::Worker(e.to_string()))?
}

/// Blocking implementation of whole-image classification
pub fn classify_image_blocking(path: &Path, classifier: &dyn Classifier) -> Result<ImageOutcome> {
    let source = loader::load_bitmap(path)?;
    let prediction = classifier.classify(&source)?;

    info!(
        "✅ Predicted class: {} ({:.1}%)",
        prediction.label,
        prediction.confidence * 100.0
    );

    Ok(ImageOutcome {
        path: path.to_path_buf(),
        source,
        prediction,
    })
}

/// Blocking implementation of grid classification
pub fn classify_grid_blocking(
    path: &Path,
    grid_text: &str,
    classifier: &dyn Classifier,
) -> Result<GridOutcome> {
    let source = loader::load_bitmap(path)?;
    let grid = GridSpec::parse(grid_text)?;

    let start = Instant::now();
    let tiles = grid::tile(&source, grid)?;
    let (cell_w, cell_h) = grid.cell_size(source.width(), source.height());
    info!("🔲 Classifying {} grid ({} cells of {}x{})", grid, tiles.len(), cell_w, cell_h);

    let results = classify_all(tiles, classifier)?;
    let elapsed = start.elapsed();
    let frequency = label_frequency(&results);

    info!(
        "✅ Classified {} cells in {:.2}s, {} distinct labels",
        results.len(),
        elapsed.as_secs_f64(),
        frequency.len()
    );

    Ok(GridOutcome {
        path: path.to_path_buf(),
        source,
        grid,
        results,
        frequency,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::labels::CategoryList;
    use crate::inference::model::top_prediction;
    use image::Rgb;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scores each tile by brightness: dark -> "night", bright -> "day"
    struct BrightnessClassifier {
        categories: CategoryList,
        calls: AtomicUsize,
    }

    impl BrightnessClassifier {
        fn new() -> Self {
            Self {
                categories: CategoryList::from_names(["night", "day"]),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Classifier for BrightnessClassifier {
        fn classify(&self, bitmap: &RgbImage) -> Result<Prediction> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mean = bitmap.pixels().map(|p| p[0] as f32).sum::<f32>()
                / (bitmap.width() * bitmap.height()) as f32;
            top_prediction(&[255.0 - mean, mean], &self.categories)
        }
    }

    fn write_fixture(name: &str, image: &RgbImage) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "imagenet-classifier-{}-{}",
            std::process::id(),
            name
        ));
        image.save(&path).unwrap();
        path
    }

    /// Left half black, right half white
    fn half_and_half(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn test_single_image_gets_one_known_label() {
        let path = write_fixture("single.png", &RgbImage::from_pixel(32, 20, Rgb([240, 240, 240])));
        let classifier = BrightnessClassifier::new();

        let outcome = classify_image_blocking(&path, &classifier).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(outcome.prediction.label, "day");
        assert!(classifier.categories.contains(&outcome.prediction.label));
        assert_eq!(outcome.source.dimensions(), (32, 20));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_grid_chain() {
        let path = write_fixture("grid.png", &half_and_half(256, 256));
        let classifier = BrightnessClassifier::new();

        let outcome = classify_grid_blocking(&path, "2X2", &classifier).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(outcome.grid, GridSpec { rows: 2, cols: 2 });
        assert_eq!(outcome.results.len(), 4);
        assert_eq!(
            outcome.results.labels().collect::<Vec<_>>(),
            vec!["night", "day", "night", "day"]
        );
        for r in outcome.results.iter() {
            assert_eq!(r.bitmap().dimensions(), (128, 128));
        }
        assert_eq!(
            outcome.frequency,
            vec![("night".to_string(), 2), ("day".to_string(), 2)]
        );
    }

    #[test]
    fn test_bad_grid_fails_before_classifying() {
        let path = write_fixture("badgrid.png", &half_and_half(16, 16));
        let classifier = BrightnessClassifier::new();

        for text in ["0x3", "abc", "17x1"] {
            let err = classify_grid_blocking(&path, text, &classifier).unwrap_err();
            assert!(matches!(err, ClassifierError::InvalidGridSpec { .. }), "{}", text);
        }
        std::fs::remove_file(&path).ok();

        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_file_reported() {
        let classifier = BrightnessClassifier::new();
        let err =
            classify_image_blocking(Path::new("/nonexistent/cat.jpg"), &classifier).unwrap_err();
        assert!(matches!(err, ClassifierError::FileOpenFailed { .. }));
    }

    #[tokio::test]
    async fn test_async_grid_runs_on_blocking_pool() {
        let path = write_fixture("async.png", &half_and_half(90, 30));
        let classifier: Arc<dyn Classifier> = Arc::new(BrightnessClassifier::new());

        let outcome = classify_grid(path.clone(), "1x3".to_string(), classifier)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(outcome.results.len(), 3);
        assert_eq!(outcome.results.get(0).unwrap().label(), "night");
        assert_eq!(outcome.results.get(2).unwrap().label(), "day");
    }

    #[tokio::test]
    async fn test_async_image_error_propagates() {
        let classifier: Arc<dyn Classifier> = Arc::new(BrightnessClassifier::new());
        let result = classify_image(PathBuf::from("/nonexistent/cat.png"), classifier).await;
        assert!(matches!(result, Err(ClassifierError::FileOpenFailed { .. })));
    }
}
