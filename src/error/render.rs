use thiserror::Error;

/// Failures raised while turning a percentile row into a chart.
///
/// Every variant aborts the render before any shape is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("Metric '{key}' is missing from the percentile row.")]
    MissingMetric { key: String },
    #[error("Metric '{key}' has invalid percentile value {value}.")]
    InvalidMetricValue { key: String, value: String },
    #[error("At least one metric is required to render a chart.")]
    EmptyMetricSpec,
    #[error("The stats response contained no percentile rows.")]
    NoRows,
}
