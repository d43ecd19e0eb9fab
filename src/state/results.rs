/// Per-tile classification results
///
/// A `ResultSet` is built in one go for a grid upload and is never edited
/// afterwards; the next upload replaces it.

use image::RgbImage;
use tracing::{debug, warn};

use crate::error::{ClassifierError, Result};
use crate::imaging::grid::Tile;
use crate::inference::model::{Classifier, Prediction};

/// One classified cell
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub tile: Tile,
    pub prediction: Prediction,
}

impl ClassificationResult {
    pub fn label(&self) -> &str {
        &self.prediction.label
    }

    pub fn bitmap(&self) -> &RgbImage {
        &self.tile.bitmap
    }
}

/// Results in tile order (`row * cols + col`)
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    results: Vec<ClassificationResult>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassificationResult> {
        self.results.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassificationResult> {
        self.results.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(ClassificationResult::label)
    }
}

/// Classify every tile in order.
///
/// Stops at the first failure and returns `ClassificationFailed` for that
/// tile; no partial results survive.
pub fn classify_all(tiles: Vec<Tile>, classifier: &dyn Classifier) -> Result<ResultSet> {
    let mut results = Vec::with_capacity(tiles.len());

    for tile in tiles {
        let index = tile.index;
        let prediction = classifier.classify(&tile.bitmap).map_err(|source| {
            warn!("❌ Cell {} failed: {}", index + 1, source);
            ClassifierError::ClassificationFailed {
                index,
                source: Box::new(source),
            }
        })?;
        debug!("Cell {} ({}, {}): {}", index + 1, tile.row, tile.col, prediction.label);
        results.push(ClassificationResult { tile, prediction });
    }

    Ok(ResultSet { results })
}

/// Count each distinct label, most common first; equal counts keep the
/// order in which the labels first appeared
pub fn label_frequency(results: &ResultSet) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for label in results.labels() {
        match counts.iter_mut().find(|(seen, _)| seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.to_string(), 1)),
        }
    }
    // Stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Multi-line summary shown above the cell viewer
pub fn summary_text(frequency: &[(String, usize)]) -> String {
    let mut text = String::from("Classification Results:\n\n");
    for (label, count) in frequency {
        text.push_str(&format!("{}: {}\n", label, count));
    }
    text
}
