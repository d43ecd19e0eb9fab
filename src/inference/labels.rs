/// ImageNet category names
///
/// The label file has one category per line; line `i` names output class `i`.

use std::path::Path;
use tracing::info;

use crate::error::{ClassifierError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryList {
    names: Vec<String>,
}

impl CategoryList {
    /// Read the label file in full
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::parse(&text)?;
        info!("🏷️  Loaded {} categories from {}", list.len(), path.display());
        Ok(list)
    }

    /// Parse label text; surrounding whitespace on each line is dropped and a
    /// trailing newline does not produce an extra category
    pub fn parse(text: &str) -> Result<Self> {
        let names: Vec<String> = text.lines().map(|line| line.trim().to_string()).collect();
        if names.is_empty() {
            return Err(ClassifierError::config("category list is empty"));
        }
        Ok(Self { names })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, label: &str) -> bool {
        self.names.iter().any(|name| name == label)
    }

    /// Fail unless there is exactly one name per network output
    pub fn ensure_matches(&self, classes: usize) -> Result<()> {
        if self.names.len() != classes {
            return Err(ClassifierError::config(format!(
                "category list has {} entries but the network produces {} classes",
                self.names.len(),
                classes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_lines() {
        let list = CategoryList::parse("tench\n goldfish \r\ngreat white shark\n").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Some("tench"));
        assert_eq!(list.get(1), Some("goldfish"));
        assert_eq!(list.get(2), Some("great white shark"));
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(matches!(
            CategoryList::parse(""),
            Err(ClassifierError::Config { .. })
        ));
    }

    #[test]
    fn test_count_mismatch_is_config_error() {
        let list = CategoryList::from_names(["a", "b", "c"]);
        assert!(list.ensure_matches(3).is_ok());
        assert!(matches!(
            list.ensure_matches(1000),
            Err(ClassifierError::Config { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "imagenet-classifier-{}-labels.txt",
            std::process::id()
        ));
        std::fs::write(&path, "cat\ndog\n").unwrap();

        let list = CategoryList::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(list, CategoryList::from_names(["cat", "dog"]));
        assert!(list.contains("dog"));
        assert!(!list.contains("cow"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CategoryList::load(Path::new("/nonexistent/imagenet_classes.txt")).unwrap_err();
        assert!(matches!(err, ClassifierError::Io { .. }));
    }
}
