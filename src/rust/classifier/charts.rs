use serde::Serialize;

use super::extractor::ClassificationResult;
use super::utils::top_k_indices;
use crate::labels::LabelRegistry;

/// Default number of pie slices
pub const DEFAULT_PIE_SLICES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Values are percentages in `[0, 100]`
    Bar,
    /// Values are raw probabilities
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f32,
}

/// A display-ready ordered list of `(label, value)` pairs, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn total(&self) -> f32 {
        self.values().sum()
    }

    /// Points in reverse order, for renderers that draw horizontal bars from
    /// the bottom up
    pub fn bottom_to_top(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.points.iter().rev()
    }

    /// Text shown next to a point: two decimals for bars, one for pie slices
    pub fn value_label(&self, point: &SeriesPoint) -> String {
        match self.kind {
            ChartKind::Bar => format!("{:.2}%", point.value),
            ChartKind::Pie => format!("{:.1}%", point.value * 100.0),
        }
    }
}

/// Builds bar and pie series from a [`ClassificationResult`].
#[derive(Debug, Clone, Copy)]
pub struct ChartSeriesBuilder {
    pie_slices: usize,
}

impl Default for ChartSeriesBuilder {
    fn default() -> Self {
        Self {
            pie_slices: DEFAULT_PIE_SLICES,
        }
    }
}

impl ChartSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pie_slices(mut self, pie_slices: usize) -> Self {
        self.pie_slices = pie_slices;
        self
    }

    /// One bar per shortlisted class, value scaled to a percentage, best first.
    pub fn build_bar_series(&self, result: &ClassificationResult, registry: &LabelRegistry) -> ChartSeries {
        let points = result
            .top5
            .iter()
            .map(|p| SeriesPoint {
                label: registry.name_of(p.index).into_owned(),
                value: p.confidence * 100.0,
            })
            .collect();

        ChartSeries {
            kind: ChartKind::Bar,
            points,
        }
    }

    /// The `min(pie_slices, N)` largest entries of the full distribution,
    /// as raw probabilities, best first.
    pub fn build_pie_series(&self, result: &ClassificationResult, registry: &LabelRegistry) -> ChartSeries {
        let distribution = &result.distribution;
        let points = top_k_indices(distribution, self.pie_slices)
            .into_iter()
            .map(|index| SeriesPoint {
                label: registry.name_of(index).into_owned(),
                value: distribution[index],
            })
            .collect();

        ChartSeries {
            kind: ChartKind::Pie,
            points,
        }
    }
}
