use std::io;

/// Represents the different types of errors that can occur while turning model
/// output into a presentable classification.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The label source is missing, unreadable or holds no labels
    #[error("Label registry unavailable: {0}")]
    RegistryUnavailable(String),
    /// The model did not produce a classification-style distribution
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
    /// The model produced a zero-length probability vector
    #[error("Empty probability distribution")]
    EmptyDistribution,
    /// The input image failed validation before inference
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    /// The model handle failed while running inference
    #[error("Model error: {0}")]
    ModelError(String),
    /// Invalid configuration parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ClassifierError {
    /// Wraps an I/O failure on the label source
    pub(crate) fn registry_io(path: &std::path::Path, err: io::Error) -> Self {
        ClassifierError::RegistryUnavailable(format!("{}: {}", path.display(), err))
    }
}
