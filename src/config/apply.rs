use std::path::PathBuf;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::RankcardArgs;
use crate::error::{AppError, AppResult, ConfigError};
use crate::metrics::MetricSpec;

use super::types::{ChartOverrides, ConfigFile};

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line win; everything else falls back to the
/// config file. Settings without a CLI flag are returned as overrides.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut RankcardArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<ChartOverrides> {
    if config.subject.is_some() && config.input.is_some() {
        return Err(AppError::config(ConfigError::ConflictingInputs));
    }

    if !is_cli(matches, "page")
        && let Some(page) = config.page
    {
        args.page = page;
    }

    let cli_picked_source = is_cli(matches, "subject") || is_cli(matches, "input");
    if !cli_picked_source {
        if let Some(subject) = config.subject.clone() {
            args.subject = Some(subject);
        }
        if let Some(input) = config.input.as_ref() {
            args.input = Some(PathBuf::from(input));
        }
    }

    if !is_cli(matches, "base_url")
        && let Some(base_url) = config.base_url.clone()
    {
        args.base_url = base_url;
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration()?;
    }

    if !is_cli(matches, "out")
        && let Some(out) = config.out.as_ref()
    {
        args.out = Some(PathBuf::from(out));
    }

    if !is_cli(matches, "format")
        && let Some(format) = config.format
    {
        args.format = Some(format);
    }

    if !is_cli(matches, "layout")
        && let Some(layout) = config.layout
    {
        args.layout = layout;
    }

    if !is_cli(matches, "out_of_range")
        && let Some(policy) = config.out_of_range
    {
        args.out_of_range = policy;
    }

    if !is_cli(matches, "chart_width")
        && let Some(width) = config.chart_width
    {
        args.chart_width = Some(ensure_positive(width, "chart_width")?);
    }

    if !is_cli(matches, "chart_height")
        && let Some(height) = config.chart_height
    {
        args.chart_height = Some(ensure_positive(height, "chart_height")?);
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    let inset = match config.inset {
        Some(inset) if inset.is_finite() && inset >= 0.0 => Some(inset),
        Some(inset) => {
            return Err(AppError::config(ConfigError::FieldMustBeNonNegative {
                field: "inset",
                value: inset,
            }));
        }
        None => None,
    };

    Ok(ChartOverrides {
        inset,
        hitter_metrics: ensure_metrics(config.hitter_metrics.as_deref(), "hitter_metrics")?,
        pitcher_metrics: ensure_metrics(config.pitcher_metrics.as_deref(), "pitcher_metrics")?,
    })
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive(value: f64, field: &'static str) -> AppResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::config(ConfigError::FieldMustBePositive {
            field,
            value,
        }))
    }
}

fn ensure_metrics(
    metrics: Option<&[MetricSpec]>,
    field: &'static str,
) -> AppResult<Option<Vec<MetricSpec>>> {
    let Some(metrics) = metrics else {
        return Ok(None);
    };
    if metrics.is_empty() {
        return Err(AppError::config(ConfigError::EmptyMetricList { field }));
    }
    if let Some(index) = metrics.iter().position(|spec| spec.key.trim().is_empty()) {
        return Err(AppError::config(ConfigError::EmptyMetricKey { field, index }));
    }
    Ok(Some(metrics.to_vec()))
}
