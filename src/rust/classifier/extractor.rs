use log::debug;
use serde::Serialize;

use super::error::ClassifierError;
use super::model::{ModelOutput, ProbabilityVector};
use super::utils::top_k_indices;

/// Default size of the ranked shortlist
pub const DEFAULT_TOP_K: usize = 5;

/// A single ranked class: its index in the distribution and its confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub index: usize,
    pub confidence: f32,
}

/// The structured form of one model output.
///
/// `top5` holds at most `k` entries (5 by default) sorted by descending
/// confidence with ascending-index tie-break; its first entry is always the
/// top-1 prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub top1_index: usize,
    pub top1_confidence: f32,
    pub top5: Vec<Prediction>,
    pub distribution: ProbabilityVector,
}

impl ClassificationResult {
    /// The top-1 prediction as a pair
    pub fn top1(&self) -> Prediction {
        Prediction {
            index: self.top1_index,
            confidence: self.top1_confidence,
        }
    }

    /// Number of classes the model produced scores for
    pub fn num_classes(&self) -> usize {
        self.distribution.len()
    }

    /// Top-1 confidence on a 0–100 integer scale, as shown by a progress meter
    pub fn confidence_meter(&self) -> u8 {
        (self.top1_confidence * 100.0).clamp(0.0, 100.0) as u8
    }
}

/// Turns a raw probability vector into a [`ClassificationResult`].
#[derive(Debug, Clone, Copy)]
pub struct ResultExtractor {
    top_k: usize,
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K }
    }
}

impl ResultExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shortlist size. Values below 1 are raised to 1 so the
    /// shortlist always contains the top-1 prediction.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Extracts a result from whatever the model returned.
    ///
    /// # Errors
    /// - `MalformedOutput` if the model is not a classification model
    /// - everything [`extract`](Self::extract) can return
    pub fn extract_output(&self, output: ModelOutput) -> Result<ClassificationResult, ClassifierError> {
        match output {
            ModelOutput::Probabilities(vector) => self.extract(vector),
            ModelOutput::Unsupported(kind) => Err(ClassifierError::MalformedOutput(format!(
                "Model output doesn't contain class probabilities ({}). Make sure the model is a classification model.",
                kind
            ))),
        }
    }

    /// Ranks a probability vector.
    ///
    /// # Errors
    /// - `EmptyDistribution` for a zero-length vector
    /// - `MalformedOutput` if any value is NaN, infinite, or negative
    pub fn extract(&self, vector: ProbabilityVector) -> Result<ClassificationResult, ClassifierError> {
        if vector.is_empty() {
            return Err(ClassifierError::EmptyDistribution);
        }
        if let Some(pos) = vector.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(ClassifierError::MalformedOutput(format!(
                "Value {} at index {} is not a probability",
                vector[pos], pos
            )));
        }

        let top5: Vec<Prediction> = top_k_indices(&vector, self.top_k)
            .into_iter()
            .map(|index| Prediction {
                index,
                confidence: vector[index],
            })
            .collect();

        // Non-empty vector and top_k >= 1 guarantee a first entry
        let Prediction { index, confidence } = top5[0];
        debug!(
            "Extracted top-1 index {} ({:.4}) from {} classes",
            index,
            confidence,
            vector.len()
        );

        Ok(ClassificationResult {
            top1_index: index,
            top1_confidence: confidence,
            top5,
            distribution: vector,
        })
    }
}
