use std::path::PathBuf;

use crate::charts::{ExportFormat, PercentileChartRenderer};
use crate::fetch::PercentileSource;
use crate::metrics::{MetricSpec, PageKind};

/// Everything needed to produce one chart.
pub(in crate::entry) struct RunPlan {
    pub(super) page: PageKind,
    pub(super) source: Box<dyn PercentileSource>,
    pub(super) metrics: Vec<MetricSpec>,
    pub(super) renderer: PercentileChartRenderer,
    pub(super) out: PathBuf,
    pub(super) format: ExportFormat,
}
