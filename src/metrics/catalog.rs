use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A percentile field in the input row and the name shown next to its scale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricSpec {
    pub key: String,
    pub label: String,
}

impl MetricSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

const HITTER_METRICS: [(&str, &str); 11] = [
    ("xwOBA_percentile", "xwOBAcon"),
    ("xBA_percentile", "xBA"),
    ("xSLG_percentile", "xSLG"),
    ("AvgEV_percentile", "Avg Exit Velocity"),
    ("Barrel%_percentile", "Barrel%"),
    ("HardHit%_percentile", "Hard Hit%"),
    ("SweetSpot%_percentile", "SweetSpot%"),
    ("Chase%_percentile", "Chase%"),
    ("Whiff%_percentile", "Whiff%"),
    ("K%_percentile", "K%"),
    ("BB%_percentile", "BB%"),
];

const PITCHER_METRICS: [(&str, &str); 12] = [
    ("xERA_percentile", "xERA"),
    ("xBA_percentile", "xBA"),
    ("FastballVelo_percentile", "Fastball Speed"),
    ("AvgEV_percentile", "Avg Exit Velocity"),
    ("Chase%_percentile", "Chase%"),
    ("Whiff%_percentile", "Whiff%"),
    ("K%_percentile", "K%"),
    ("BB%_percentile", "BB%"),
    ("Barrel%_percentile", "Barrel%"),
    ("HardHit%_percentile", "Hard Hit%"),
    ("GB%_percentile", "GB%"),
    ("Extension_percentile", "Extension"),
];

/// Dashboard page a chart is rendered for.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Hitter,
    Pitcher,
}

impl PageKind {
    /// Built-in metric catalogue, in display order.
    #[must_use]
    pub fn metrics(self) -> Vec<MetricSpec> {
        let table: &[(&str, &str)] = match self {
            PageKind::Hitter => &HITTER_METRICS,
            PageKind::Pitcher => &PITCHER_METRICS,
        };
        table
            .iter()
            .map(|(key, label)| MetricSpec::new(*key, *label))
            .collect()
    }

    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            PageKind::Hitter => "/update_hitter_percentiles",
            PageKind::Pitcher => "/update_pitcher_percentiles",
        }
    }

    /// Form field the backend reads the subject name from.
    #[must_use]
    pub const fn subject_field(self) -> &'static str {
        match self {
            PageKind::Hitter => "Hitter",
            PageKind::Pitcher => "Pitcher",
        }
    }

    /// Chart-area height used by the dashboard for this page.
    #[must_use]
    pub const fn default_chart_height(self) -> f64 {
        match self {
            PageKind::Hitter => 510.0,
            PageKind::Pitcher => 535.0,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PageKind::Hitter => "hitter",
            PageKind::Pitcher => "pitcher",
        }
    }
}
