use serde::Serialize;

use crate::classifier::image::RGB_CHANNELS;
use crate::classifier::{ClassifierError, DEFAULT_PIE_SLICES, DEFAULT_TOP_K};

/// Tunables for a [`ClassificationPipeline`](crate::ClassificationPipeline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    /// Size of the ranked shortlist and of the bar chart
    pub top_k: usize,
    /// Maximum number of pie slices
    pub pie_slices: usize,
    /// Channel count the model expects in its input image
    pub expected_channels: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            pie_slices: DEFAULT_PIE_SLICES,
            expected_channels: RGB_CHANNELS,
        }
    }
}

impl PipelineConfig {
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_pie_slices(mut self, pie_slices: usize) -> Self {
        self.pie_slices = pie_slices;
        self
    }

    pub fn with_expected_channels(mut self, channels: usize) -> Self {
        self.expected_channels = channels;
        self
    }

    /// Rejects zero-sized settings
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.top_k == 0 {
            return Err(ClassifierError::ValidationError("top_k must be at least 1".into()));
        }
        if self.pie_slices == 0 {
            return Err(ClassifierError::ValidationError("pie_slices must be at least 1".into()));
        }
        if self.expected_channels == 0 {
            return Err(ClassifierError::ValidationError(
                "expected_channels must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.pie_slices, 8);
        assert_eq!(config.expected_channels, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(PipelineConfig::default().with_top_k(0).validate().is_err());
        assert!(PipelineConfig::default().with_pie_slices(0).validate().is_err());
        assert!(PipelineConfig::default().with_expected_channels(0).validate().is_err());
    }
}
