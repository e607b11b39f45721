use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use breedlens::classifier::{DEFAULT_PIE_SLICES, DEFAULT_TOP_K};
use breedlens::{
    ChartSeries, ClassificationPipeline, ClassificationReport, LabelRegistry, ModelOutput,
    PipelineConfig, ProbabilityVector,
};
use clap::Parser;

/// Render a classifier's probability output the way the prediction page shows it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Label file, one class per line (defaults to $BREEDLENS_LABELS or class_names.txt)
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// Comma-separated class probabilities
    #[arg(short, long, conflicts_with = "probs_file", required_unless_present = "probs_file")]
    probs: Option<String>,

    /// File holding class probabilities separated by commas or whitespace
    #[arg(long)]
    probs_file: Option<PathBuf>,

    /// Number of classes in the ranked shortlist
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Maximum number of pie slices
    #[arg(long, default_value_t = DEFAULT_PIE_SLICES)]
    pie_slices: usize,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_probabilities(text: &str) -> Result<ProbabilityVector> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .with_context(|| format!("Invalid probability value '{}'", s))
        })
        .collect::<Result<Vec<f32>>>()
        .map(ProbabilityVector::from)
}

fn read_probabilities(args: &Args) -> Result<ProbabilityVector> {
    match (&args.probs, &args.probs_file) {
        (Some(probs), _) => parse_probabilities(probs),
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            parse_probabilities(&text)
        }
        (None, None) => bail!("Provide --probs or --probs-file"),
    }
}

fn print_series(title: &str, series: &ChartSeries) {
    println!("\n{}:", title);
    for point in &series.points {
        println!("  {:<24} {:>8}", point.label, series.value_label(point));
    }
}

fn print_report(report: &ClassificationReport) {
    println!("Predicted: {}", report.predicted_label);
    println!("Confidence: {:.2}%", report.result.top1_confidence * 100.0);
    println!("Confidence meter: {}/100", report.confidence_meter);
    print_series(&format!("Top-{} predictions", report.bar.len()), &report.bar);
    print_series(
        &format!("Probability distribution (Top {} shown)", report.pie.len()),
        &report.pie,
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let labels_path = args.labels.clone().unwrap_or_else(LabelRegistry::default_path);
    let registry = LabelRegistry::load(&labels_path)?;

    let config = PipelineConfig::default()
        .with_top_k(args.top_k)
        .with_pie_slices(args.pie_slices);
    let pipeline = ClassificationPipeline::with_config(config)?;

    let probabilities = read_probabilities(&args)?;
    let report = pipeline.summarize(ModelOutput::Probabilities(probabilities), &registry)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}
