//! Turns an image classifier's probability output into a ranked prediction
//! and chart-ready series for a presentation layer.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use breedlens::{ClassificationPipeline, FixedOutputModel, LabelRegistry};
//! use ndarray::Array3;
//!
//! let registry = LabelRegistry::parse("Gir\nSahiwal\nKankrej\n")?;
//! let model = FixedOutputModel::with_probabilities(vec![0.7f32, 0.2, 0.1]);
//! let image = Array3::<u8>::zeros((224, 224, 3));
//!
//! let report = ClassificationPipeline::new().run(image.view(), &model, &registry)?;
//! assert_eq!(report.predicted_label, "Gir");
//! for point in &report.bar.points {
//!     println!("{}: {:.2}%", point.label, point.value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The registry and the pipeline are immutable and can be shared across
//! threads. Model handles must be `Send + Sync`; a model that cannot run
//! concurrently should serialize access inside its own `infer`.
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use breedlens::{ClassificationPipeline, FixedOutputModel, LabelRegistry};
//! use ndarray::Array3;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let registry = LabelRegistry::from_labels(["Alpha", "Beta"])?;
//! let model = Arc::new(FixedOutputModel::with_probabilities(vec![0.4f32, 0.6]));
//! let pipeline = ClassificationPipeline::new();
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let (registry, model, pipeline) = (registry.clone(), Arc::clone(&model), pipeline.clone());
//!     handles.push(thread::spawn(move || {
//!         let image = Array3::<u8>::zeros((4, 4, 3));
//!         pipeline.run(image.view(), model.as_ref(), &registry).unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod labels;

pub use classifier::{
    ChartKind, ChartSeries, ChartSeriesBuilder, ClassificationPipeline, ClassificationReport,
    ClassificationResult, ClassifierError, FixedOutputModel, ImageModel, ModelOutput,
    PipelineOutcome, PipelineStage, Prediction, ProbabilityVector, ResultExtractor, SeriesPoint,
};
pub use config::PipelineConfig;
pub use labels::LabelRegistry;

pub fn init_logger() {
    env_logger::init();
}
