use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::RenderError;

const MIN_PERCENTILE: f64 = 0.0;
const MAX_PERCENTILE: f64 = 100.0;

/// One decoded record from the stats backend: metric key to percentile value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PercentileRow {
    values: Map<String, Value>,
}

impl PercentileRow {
    #[must_use]
    pub const fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Builds a row from numeric pairs. Non-finite values become `null`.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), Value::from(value)))
            .collect();
        Self { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Takes the first row of a backend response; the rest are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::NoRows` when `rows` is empty.
    pub fn first_of<I>(rows: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = PercentileRow>,
    {
        rows.into_iter().next().ok_or(RenderError::NoRows)
    }

    /// Reads the raw percentile stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `MissingMetric` when the key is absent and `InvalidMetricValue`
    /// when the value is not a finite number.
    pub fn percentile(&self, key: &str) -> Result<f64, RenderError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| RenderError::MissingMetric {
                key: key.to_owned(),
            })?;
        value
            .as_f64()
            .filter(|number| number.is_finite())
            .ok_or_else(|| RenderError::InvalidMetricValue {
                key: key.to_owned(),
                value: value.to_string(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What to do with percentiles outside `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRange {
    #[default]
    Reject,
    Clamp,
}

impl OutOfRange {
    /// Applies the policy to a percentile read from `key`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMetricValue` for out-of-range values under `Reject`.
    pub fn apply(self, key: &str, value: f64) -> Result<f64, RenderError> {
        if (MIN_PERCENTILE..=MAX_PERCENTILE).contains(&value) {
            return Ok(value);
        }
        match self {
            OutOfRange::Reject => Err(RenderError::InvalidMetricValue {
                key: key.to_owned(),
                value: value.to_string(),
            }),
            OutOfRange::Clamp => {
                let clamped = value.clamp(MIN_PERCENTILE, MAX_PERCENTILE);
                warn!(metric = key, value, clamped, "Clamping out-of-range percentile");
                Ok(clamped)
            }
        }
    }
}
