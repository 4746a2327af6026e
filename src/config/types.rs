use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::charts::{ExportFormat, SlotLayout};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::metrics::{MetricSpec, OutOfRange, PageKind};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub page: Option<PageKind>,
    pub subject: Option<String>,
    pub input: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<DurationValue>,
    pub out: Option<String>,
    pub format: Option<ExportFormat>,
    pub layout: Option<SlotLayout>,
    pub out_of_range: Option<OutOfRange>,
    pub chart_width: Option<f64>,
    pub chart_height: Option<f64>,
    pub inset: Option<f64>,
    pub hitter_metrics: Option<Vec<MetricSpec>>,
    pub pitcher_metrics: Option<Vec<MetricSpec>>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(AppError::config(ConfigError::InvalidDuration {
                        field: "timeout",
                        source: ValidationError::DurationZero,
                    }))
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text).map_err(|err| match err {
                AppError::Validation(source) => AppError::config(ConfigError::InvalidDuration {
                    field: "timeout",
                    source,
                }),
                other => other,
            }),
        }
    }
}

/// Chart settings that only exist in config files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartOverrides {
    pub inset: Option<f64>,
    pub hitter_metrics: Option<Vec<MetricSpec>>,
    pub pitcher_metrics: Option<Vec<MetricSpec>>,
}

impl ChartOverrides {
    /// Custom catalogue for `page`, if the config replaced the built-in one.
    #[must_use]
    pub fn metrics_for(&self, page: PageKind) -> Option<&[MetricSpec]> {
        match page {
            PageKind::Hitter => self.hitter_metrics.as_deref(),
            PageKind::Pitcher => self.pitcher_metrics.as_deref(),
        }
    }
}
