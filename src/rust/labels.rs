use std::borrow::Cow;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::classifier::ClassifierError;

/// Environment variable consulted for the label file location
pub const LABELS_ENV_VAR: &str = "BREEDLENS_LABELS";

/// File name used when no label path is configured
pub const DEFAULT_LABELS_FILE: &str = "class_names.txt";

/// An immutable, ordered list of class names.
///
/// Index `i` of the model's probability vector corresponds to line `i` of the
/// label source (blank lines skipped). The registry is cheap to clone and is
/// safe to share across threads.
#[derive(Debug, Clone)]
pub struct LabelRegistry {
    labels: Arc<[String]>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<LabelRegistry>();
    }
};

impl LabelRegistry {
    /// Returns the label file path, checking `BREEDLENS_LABELS` first
    pub fn default_path() -> PathBuf {
        match env::var(LABELS_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => PathBuf::from(DEFAULT_LABELS_FILE),
        }
    }

    /// Loads labels from a newline-separated text file.
    ///
    /// # Errors
    /// `RegistryUnavailable` if the file is missing, unreadable, or has no
    /// non-blank lines.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifierError::RegistryUnavailable(format!(
                "Missing {}. Create it with one class per line.",
                path.display()
            )));
        }
        let text = fs::read_to_string(path).map_err(|e| ClassifierError::registry_io(path, e))?;
        let registry = Self::parse(&text)?;
        info!("Loaded {} labels from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Parses an in-memory label source using the same rules as [`load`](Self::load)
    pub fn parse(text: &str) -> Result<Self, ClassifierError> {
        Self::from_labels(text.lines())
    }

    /// Builds a registry from individual labels. Each label is trimmed and
    /// blank entries are dropped.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        if labels.is_empty() {
            return Err(ClassifierError::RegistryUnavailable(
                "Label source contains no class names".into(),
            ));
        }

        Ok(Self { labels: labels.into() })
    }

    /// Returns the label for `index`, or `Class_<index>` if the registry is
    /// shorter than the model output. Never fails.
    pub fn name_of(&self, index: usize) -> Cow<'_, str> {
        match self.labels.get(index) {
            Some(label) => Cow::Borrowed(label.as_str()),
            None => {
                debug!(
                    "Class index {} is outside the label registry ({} labels), using placeholder",
                    index,
                    self.labels.len()
                );
                Cow::Owned(format!("Class_{}", index))
            }
        }
    }

    /// How many of `num_classes` model outputs have no registered label
    pub fn unlabeled_count(&self, num_classes: usize) -> usize {
        num_classes.saturating_sub(self.labels.len())
    }

    /// Number of registered labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All labels in index order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
