/// Grid window state that is independent of widgets
///
/// Holds the busy flag, the latest batch, the cell cursor and the status
/// lines. A finished batch replaces everything at once; a failed one
/// clears the previous batch so only the error is left on screen.

use std::sync::Arc;
use tracing::warn;

use super::navigator::{NavState, Navigator};
use super::results::{summary_text, ClassificationResult};
use crate::error::ClassifierError;
use crate::pipeline::GridOutcome;

pub const IDLE_TEXT: &str = "Upload a grid image to see the classification results";

/// What a background grid run reports back to the window
pub type GridReply = std::result::Result<Arc<GridOutcome>, Arc<ClassifierError>>;

#[derive(Debug, Clone)]
pub struct GridSession {
    busy: bool,
    /// Frequency summary, progress, or error text
    status: String,
    time_text: String,
    outcome: Option<Arc<GridOutcome>>,
    navigator: Navigator,
}

impl Default for GridSession {
    fn default() -> Self {
        Self {
            busy: false,
            status: IDLE_TEXT.to_string(),
            time_text: String::new(),
            outcome: None,
            navigator: Navigator::default(),
        }
    }
}

impl GridSession {
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn outcome(&self) -> Option<&GridOutcome> {
        self.outcome.as_deref()
    }

    /// Navigation state as the buttons see it; nothing moves while busy
    pub fn nav_state(&self) -> NavState {
        if self.busy {
            NavState::Empty
        } else {
            self.navigator.state()
        }
    }

    /// Mark a run as started; returns false if one is already in flight
    pub fn start(&mut self, grid_text: &str) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.status = format!("Classifying {} grid...", grid_text.trim());
        self.time_text.clear();
        true
    }

    /// Take the result of a run and show it, or show the error in its place
    pub fn finish(&mut self, reply: GridReply) {
        self.busy = false;
        match reply {
            Ok(outcome) => {
                self.navigator.reset(outcome.results.len());
                self.status = summary_text(&outcome.frequency);
                self.time_text = format!(
                    "Classification Time: {:.2} seconds",
                    outcome.elapsed.as_secs_f64()
                );
                self.outcome = Some(outcome);
            }
            Err(e) => {
                warn!("⚠️  {}", e);
                self.outcome = None;
                self.navigator.reset(0);
                self.time_text.clear();
                self.status = format!("Error processing image: {}", e);
            }
        }
    }

    pub fn previous(&mut self) -> bool {
        !self.busy && self.navigator.previous()
    }

    pub fn next(&mut self) -> bool {
        !self.busy && self.navigator.next()
    }

    /// Index and result of the cell under the cursor
    pub fn current(&self) -> Option<(usize, &ClassificationResult)> {
        let index = self.navigator.cursor()?;
        let result = self.outcome.as_ref()?.results.get(index)?;
        Some((index, result))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.navigator.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::imaging::grid::{tile, GridSpec};
    use crate::inference::labels::CategoryList;
    use crate::inference::model::{top_prediction, Classifier, Prediction};
    use crate::state::results::{classify_all, label_frequency};
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;
    use std::time::Duration;

    /// Labels every tile by the red value of its first pixel
    struct RedClassifier {
        categories: CategoryList,
    }

    impl Classifier for RedClassifier {
        fn classify(&self, bitmap: &RgbImage) -> Result<Prediction> {
            let red = bitmap.get_pixel(0, 0)[0] as f32;
            top_prediction(&[255.0 - red, red], &self.categories)
        }
    }

    fn outcome(spec: &str) -> Arc<GridOutcome> {
        let source = RgbImage::from_fn(60, 60, |x, _| {
            if x % 20 < 10 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 0, 0])
            }
        });
        let grid = GridSpec::parse(spec).unwrap();
        let classifier = RedClassifier {
            categories: CategoryList::from_names(["dark", "red"]),
        };
        let results = classify_all(tile(&source, grid).unwrap(), &classifier).unwrap();
        let frequency = label_frequency(&results);
        Arc::new(GridOutcome {
            path: PathBuf::from("grid.png"),
            source,
            grid,
            results,
            frequency,
            elapsed: Duration::from_millis(1250),
        })
    }

    fn failure() -> GridReply {
        Err(Arc::new(ClassifierError::invalid_grid("0x3", "rows must be at least 1")))
    }

    #[test]
    fn test_idle_session() {
        let session = GridSession::default();
        assert!(!session.is_busy());
        assert_eq!(session.status(), IDLE_TEXT);
        assert_eq!(session.nav_state(), NavState::Empty);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_outcome_shows_first_cell_and_summary() {
        let mut session = GridSession::default();
        assert!(session.start("3x3"));
        session.finish(Ok(outcome("3x3")));

        assert!(!session.is_busy());
        assert_eq!(session.cursor(), Some(0));
        assert_eq!(session.nav_state(), NavState::AtStart);
        assert_eq!(session.current().unwrap().1.label(), "dark");
        assert!(session.status().starts_with("Classification Results:\n\n"));
        assert_eq!(session.time_text(), "Classification Time: 1.25 seconds");
    }

    #[test]
    fn test_new_outcome_resets_cursor() {
        let mut session = GridSession::default();
        session.start("3x3");
        session.finish(Ok(outcome("3x3")));
        assert!(session.next());
        assert!(session.next());
        assert_eq!(session.cursor(), Some(2));

        session.start("1x2");
        session.finish(Ok(outcome("1x2")));
        assert_eq!(session.cursor(), Some(0));
        assert_eq!(session.outcome().unwrap().results.len(), 2);
    }

    #[test]
    fn test_error_clears_previous_results() {
        let mut session = GridSession::default();
        session.start("3x3");
        session.finish(Ok(outcome("3x3")));
        session.next();

        session.start("0x3");
        session.finish(failure());

        assert!(session.outcome().is_none());
        assert!(session.current().is_none());
        assert_eq!(session.nav_state(), NavState::Empty);
        assert!(session.time_text().is_empty());
        assert!(session.status().starts_with("Error processing image: invalid grid size"));
    }

    #[test]
    fn test_busy_ignores_navigation_and_second_start() {
        let mut session = GridSession::default();
        session.start("3x3");
        session.finish(Ok(outcome("3x3")));
        session.next();

        assert!(session.start("2x2"));
        assert!(!session.start("2x2"));
        assert_eq!(session.nav_state(), NavState::Empty);
        assert!(!session.next());
        assert!(!session.previous());
        assert_eq!(session.cursor(), Some(1));
        assert_eq!(session.status(), "Classifying 2x2 grid...");
    }
}
