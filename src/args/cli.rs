use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::charts::{ExportFormat, SlotLayout};
use crate::fetch::DEFAULT_BASE_URL;
use crate::metrics::{OutOfRange, PageKind};

use super::parsers::{parse_bool_env, parse_duration_arg, parse_pixels};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Render percentile-rank charts for hitters and pitchers as SVG or PNG."
)]
pub struct RankcardArgs {
    /// Dashboard page to render (selects the metric catalogue and endpoint)
    #[arg(long, value_enum, default_value_t = PageKind::Hitter)]
    pub page: PageKind,

    /// Player to request from the stats backend
    #[arg(long, short = 's', conflicts_with = "input")]
    pub subject: Option<String>,

    /// Read percentiles from a JSON file instead of the backend
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Base URL of the stats backend
    #[arg(long = "base-url", env = "RANKCARD_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long, default_value = "10s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Output path. Defaults to <subject>_percentiles.<format> in the working directory.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    /// Output format. Inferred from the --out extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// How the vertical position of each metric row is derived
    #[arg(long, value_enum, default_value_t = SlotLayout::WidthDerived)]
    pub layout: SlotLayout,

    /// What to do with percentiles outside 0..=100
    #[arg(long = "out-of-range", value_enum, default_value_t = OutOfRange::Reject)]
    pub out_of_range: OutOfRange,

    /// Width of the percentile scale in pixels
    #[arg(long = "chart-width", value_parser = parse_pixels)]
    pub chart_width: Option<f64>,

    /// Height of the chart area in pixels (defaults depend on --page)
    #[arg(long = "chart-height", value_parser = parse_pixels)]
    pub chart_height: Option<f64>,

    /// Path to config file (TOML/JSON). Defaults to ./rankcard.toml or ./rankcard.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by RANKCARD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
