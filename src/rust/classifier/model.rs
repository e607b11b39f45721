use std::ops::Deref;

use ndarray::{Array1, ArrayView3};
use serde::Serialize;

use super::error::ClassifierError;

/// Per-class confidence scores indexed by class id.
///
/// This is the plain numeric form the rest of the crate works with; tensor
/// types are converted into it at the model boundary. Values are consumed
/// as-is and never renormalized.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ProbabilityVector(Vec<f32>);

impl ProbabilityVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Sum of all values; ≈1.0 for a well-formed distribution
    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }
}

impl Deref for ProbabilityVector {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for ProbabilityVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

impl From<&[f32]> for ProbabilityVector {
    fn from(values: &[f32]) -> Self {
        Self(values.to_vec())
    }
}

impl From<Array1<f32>> for ProbabilityVector {
    fn from(values: Array1<f32>) -> Self {
        Self(values.iter().copied().collect())
    }
}

/// What a model handle produced for one image.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// A classification head's per-class probabilities
    Probabilities(ProbabilityVector),
    /// Output of some other task (detection, segmentation, ...). Carries a
    /// short description of what the model actually is.
    Unsupported(String),
}

impl ModelOutput {
    pub fn probabilities(values: impl Into<ProbabilityVector>) -> Self {
        ModelOutput::Probabilities(values.into())
    }
}

/// A loaded image classification model.
///
/// The handle is constructed once by the caller and passed into every
/// pipeline run. Implementations that cannot run concurrently must serialize
/// access themselves, e.g. by holding their session behind a `Mutex`.
pub trait ImageModel: Send + Sync {
    /// Runs the model on an H×W×3 RGB image
    fn infer(&self, image: ArrayView3<'_, u8>) -> Result<ModelOutput, ClassifierError>;
}

/// A model handle that returns the same output for every image.
///
/// Useful when inference has already happened elsewhere and only the
/// presentation half of the pipeline is needed, and for tests.
#[derive(Debug, Clone)]
pub struct FixedOutputModel {
    output: ModelOutput,
}

impl FixedOutputModel {
    pub fn new(output: ModelOutput) -> Self {
        Self { output }
    }

    pub fn with_probabilities(values: impl Into<ProbabilityVector>) -> Self {
        Self::new(ModelOutput::probabilities(values))
    }
}

impl ImageModel for FixedOutputModel {
    fn infer(&self, _image: ArrayView3<'_, u8>) -> Result<ModelOutput, ClassifierError> {
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    #[test]
    fn test_array_conversion_preserves_order() {
        let vector = ProbabilityVector::from(array![0.1f32, 0.6, 0.3]);
        assert_eq!(vector.as_slice(), &[0.1, 0.6, 0.3]);
        assert!((vector.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_output_model_ignores_image() {
        let model = FixedOutputModel::with_probabilities(vec![0.5f32, 0.5]);
        let image = Array3::<u8>::zeros((4, 4, 3));
        let output = model.infer(image.view()).unwrap();
        assert_eq!(output, ModelOutput::probabilities(vec![0.5f32, 0.5]));
    }
}
