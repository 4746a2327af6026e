//! Metric catalogues and the percentile row consumed by the chart renderer.
mod catalog;
mod row;


pub use catalog::{MetricSpec, PageKind};
pub use row::{OutOfRange, PercentileRow};
