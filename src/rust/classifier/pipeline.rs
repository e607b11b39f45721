use std::fmt;

use log::{debug, error, info, warn};
use ndarray::ArrayView3;
use serde::Serialize;

use super::charts::{ChartSeries, ChartSeriesBuilder};
use super::error::ClassifierError;
use super::extractor::{ClassificationResult, ResultExtractor};
use super::image::{to_rgb, validate_layout, RGB_CHANNELS};
use super::model::{ImageModel, ModelOutput};
use crate::config::PipelineConfig;
use crate::labels::LabelRegistry;

/// Stages one pipeline run moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStage {
    Idle,
    Validating,
    Inferring,
    Extracting,
    BuildingCharts,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Inferring => "inferring",
            Self::Extracting => "extracting",
            Self::BuildingCharts => "building charts",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Everything the presentation layer needs to render one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub result: ClassificationResult,
    /// Label of the top-1 class
    pub predicted_label: String,
    /// Top-1 confidence on a 0–100 scale
    pub confidence_meter: u8,
    pub bar: ChartSeries,
    pub pie: ChartSeries,
}

/// Result of one pipeline run. `Err` is the terminal failed state.
pub type PipelineOutcome = Result<ClassificationReport, ClassifierError>;

/// Validates an image, runs the model, and prepares the result for display.
///
/// A pipeline holds no model and no mutable state; the model handle and the
/// label registry are passed into each [`run`](Self::run), so one pipeline
/// can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ClassificationPipeline {
    config: PipelineConfig,
    extractor: ResultExtractor,
    charts: ChartSeriesBuilder,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ClassificationPipeline>();
    }
};

impl ClassificationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline with custom settings
    ///
    /// # Errors
    /// `ValidationError` if any setting is zero
    pub fn with_config(config: PipelineConfig) -> Result<Self, ClassifierError> {
        config.validate()?;
        Ok(Self {
            config,
            extractor: ResultExtractor::new().with_top_k(config.top_k),
            charts: ChartSeriesBuilder::new().with_pie_slices(config.pie_slices),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Classifies one image end to end.
    ///
    /// When the model expects RGB, grayscale and RGBA images are converted
    /// first. Any stage failure aborts the run; nothing is retried.
    pub fn run(
        &self,
        image: ArrayView3<'_, u8>,
        model: &dyn ImageModel,
        registry: &LabelRegistry,
    ) -> PipelineOutcome {
        debug!("Pipeline stage: {} -> {}", PipelineStage::Idle, PipelineStage::Validating);
        let converted;
        let image = if self.config.expected_channels == RGB_CHANNELS && image.dim().2 != RGB_CHANNELS {
            debug!("Converting {}-channel image to RGB", image.dim().2);
            converted = to_rgb(image).map_err(|e| Self::fail(PipelineStage::Validating, e))?;
            converted.view()
        } else {
            image.reborrow()
        };
        validate_layout(image, self.config.expected_channels)
            .map_err(|e| Self::fail(PipelineStage::Validating, e))?;

        Self::enter(PipelineStage::Inferring);
        let output = model
            .infer(image)
            .map_err(|e| Self::fail(PipelineStage::Inferring, e))?;

        self.summarize(output, registry)
    }

    /// Runs the post-inference half of the pipeline on output the caller
    /// already has.
    pub fn summarize(&self, output: ModelOutput, registry: &LabelRegistry) -> PipelineOutcome {
        Self::enter(PipelineStage::Extracting);
        let result = self
            .extractor
            .extract_output(output)
            .map_err(|e| Self::fail(PipelineStage::Extracting, e))?;

        Self::enter(PipelineStage::BuildingCharts);
        let unlabeled = registry.unlabeled_count(result.num_classes());
        if unlabeled > 0 {
            warn!(
                "Model produced {} classes but only {} labels are registered; {} classes use placeholder names",
                result.num_classes(),
                registry.len(),
                unlabeled
            );
        }
        let bar = self.charts.build_bar_series(&result, registry);
        let pie = self.charts.build_pie_series(&result, registry);

        let predicted_label = registry.name_of(result.top1_index).into_owned();
        let confidence_meter = result.confidence_meter();
        Self::enter(PipelineStage::Done);
        info!(
            "Predicted {} ({:.2}%) from {} classes",
            predicted_label,
            result.top1_confidence * 100.0,
            result.num_classes()
        );

        Ok(ClassificationReport {
            result,
            predicted_label,
            confidence_meter,
            bar,
            pie,
        })
    }

    fn enter(stage: PipelineStage) {
        debug!("Pipeline stage: {}", stage);
    }

    fn fail(stage: PipelineStage, err: ClassifierError) -> ClassifierError {
        error!("Pipeline failed while {}: {}", stage, err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FixedOutputModel;
    use ndarray::Array3;

    struct FailingModel;

    impl ImageModel for FailingModel {
        fn infer(&self, _image: ArrayView3<'_, u8>) -> Result<ModelOutput, ClassifierError> {
            Err(ClassifierError::ModelError("session closed".into()))
        }
    }

    fn registry() -> LabelRegistry {
        LabelRegistry::from_labels(["Alpha", "Beta", "Gamma"]).unwrap()
    }

    #[test]
    fn test_run_produces_report() {
        let model = FixedOutputModel::with_probabilities(vec![0.1f32, 0.2, 0.7]);
        let image = Array3::<u8>::zeros((8, 8, 3));
        let report = ClassificationPipeline::new()
            .run(image.view(), &model, &registry())
            .unwrap();
        assert_eq!(report.predicted_label, "Gamma");
        assert_eq!(report.confidence_meter, 70);
        assert_eq!(report.bar.len(), 3);
        assert_eq!(report.pie.len(), 3);
    }

    #[test]
    fn test_invalid_image_stops_before_inference() {
        let model = FailingModel;
        let image = Array3::<u8>::zeros((8, 8, 5));
        let result = ClassificationPipeline::new().run(image.view(), &model, &registry());
        assert!(matches!(result, Err(ClassifierError::InvalidImage(_))));
    }

    #[test]
    fn test_rgba_image_is_converted_before_inference() {
        let model = FixedOutputModel::with_probabilities(vec![0.6f32, 0.4]);
        let image = Array3::<u8>::zeros((8, 8, 4));
        let report = ClassificationPipeline::new()
            .run(image.view(), &model, &registry())
            .unwrap();
        assert_eq!(report.predicted_label, "Alpha");
    }

    #[test]
    fn test_non_rgb_models_skip_conversion() {
        let config = PipelineConfig::default().with_expected_channels(1);
        let pipeline = ClassificationPipeline::with_config(config).unwrap();
        let model = FixedOutputModel::with_probabilities(vec![0.6f32, 0.4]);
        let gray = Array3::<u8>::zeros((8, 8, 1));
        assert!(pipeline.run(gray.view(), &model, &registry()).is_ok());
        let rgb = Array3::<u8>::zeros((8, 8, 3));
        assert!(matches!(
            pipeline.run(rgb.view(), &model, &registry()),
            Err(ClassifierError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_model_failure_is_reported() {
        let image = Array3::<u8>::zeros((8, 8, 3));
        let result = ClassificationPipeline::new().run(image.view(), &FailingModel, &registry());
        assert!(matches!(result, Err(ClassifierError::ModelError(_))));
    }

    #[test]
    fn test_with_config_applies_settings() {
        let config = PipelineConfig::default().with_top_k(2).with_pie_slices(1);
        let pipeline = ClassificationPipeline::with_config(config).unwrap();
        let report = pipeline
            .summarize(ModelOutput::probabilities(vec![0.5f32, 0.3, 0.2]), &registry())
            .unwrap();
        assert_eq!(report.result.top5.len(), 2);
        assert_eq!(report.bar.len(), 2);
        assert_eq!(report.pie.len(), 1);
    }

    #[test]
    fn test_with_config_rejects_zero_top_k() {
        let config = PipelineConfig::default().with_top_k(0);
        assert!(matches!(
            ClassificationPipeline::with_config(config),
            Err(ClassifierError::ValidationError(_))
        ));
    }
}
