mod error;
mod model;
mod extractor;
mod charts;
mod pipeline;
pub mod image;
mod utils;

pub use error::ClassifierError;
pub use model::{FixedOutputModel, ImageModel, ModelOutput, ProbabilityVector};
pub use extractor::{ClassificationResult, Prediction, ResultExtractor, DEFAULT_TOP_K};
pub use charts::{ChartKind, ChartSeries, ChartSeriesBuilder, SeriesPoint, DEFAULT_PIE_SLICES};
pub use pipeline::{ClassificationPipeline, ClassificationReport, PipelineOutcome, PipelineStage};
