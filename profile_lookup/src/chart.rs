use crate::histogram::LanguageHistogram;
use strum_macros::Display;

pub const DATASET_LABEL: &str = "Languages";

/// Slice colours, reused from the start when a chart has more slices.
pub const PALETTE: [&str; 7] = [
    "#ff6384", "#36a2eb", "#ffce56", "#4bc0c0", "#9966ff", "#ff9f40", "#c9cbcf",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ChartKind {
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
}

/// Everything a charting backend needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub dataset_label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<u32>,
    pub palette: &'static [&'static str],
    pub legend: LegendPosition,
}

impl ChartSpec {
    /// Doughnut keyed by language name, valued by repository count, legend at the bottom.
    pub fn languages(histogram: &LanguageHistogram) -> Self {
        ChartSpec {
            kind: ChartKind::Doughnut,
            dataset_label: DATASET_LABEL,
            labels: histogram.labels(),
            values: histogram.counts(),
            palette: &PALETTE,
            legend: LegendPosition::Bottom,
        }
    }

    pub fn colour_for(&self, index: usize) -> &'static str {
        match self.palette.len() {
            0 => PALETTE[index % PALETTE.len()],
            len => self.palette[index % len],
        }
    }

    /// Fraction of the whole taken by slice `index`, `0.0` when the chart is empty.
    pub fn share(&self, index: usize) -> f32 {
        let total: u32 = self.values.iter().sum();
        match (self.values.get(index), total) {
            (Some(value), total) if total > 0 => *value as f32 / total as f32,
            _ => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A drawn chart owned by whoever asked for it.
pub trait ChartHandle {
    /// Removes the chart from its surface.
    fn destroy(self);
}

/// Tests

#[cfg(test)]
fn histogram() -> LanguageHistogram {
    use crate::api::RepoSummary;

    let repos: Vec<RepoSummary> = ["JavaScript", "JavaScript", "Ruby"]
        .iter()
        .map(|lang| RepoSummary::new("r".into(), "u".into(), 0, 0, Some(lang.to_string())))
        .collect();
    LanguageHistogram::from_repos(&repos)
}

#[test]
fn languages_chart_test() {
    let spec = ChartSpec::languages(&histogram());
    assert_eq!(spec.kind, ChartKind::Doughnut);
    assert_eq!(spec.legend, LegendPosition::Bottom);
    assert_eq!(spec.dataset_label, "Languages");
    assert_eq!(spec.labels, vec!["JavaScript".to_string(), "Ruby".to_string()]);
    assert_eq!(spec.values, vec![2, 1]);
    assert_eq!(spec.kind.to_string(), "doughnut");
}

#[test]
fn share_test() {
    let spec = ChartSpec::languages(&histogram());
    assert!((spec.share(0) - 2.0 / 3.0).abs() < f32::EPSILON);
    assert!((spec.share(1) - 1.0 / 3.0).abs() < f32::EPSILON);
    assert_eq!(spec.share(2), 0.0);

    let empty = ChartSpec::languages(&LanguageHistogram::default());
    assert!(empty.is_empty());
    assert_eq!(empty.share(0), 0.0);
}

#[test]
fn colour_cycles_test() {
    let spec = ChartSpec::languages(&histogram());
    assert_eq!(spec.colour_for(0), "#ff6384");
    assert_eq!(spec.colour_for(6), "#c9cbcf");
    assert_eq!(spec.colour_for(7), "#ff6384");
}
