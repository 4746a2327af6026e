use std::path::PathBuf;

use clap::ArgMatches;

use crate::args::RankcardArgs;
use crate::charts::{ChartLayout, ExportFormat, PercentileChartRenderer};
use crate::config::ChartOverrides;
use crate::error::{AppError, AppResult, ValidationError};
use crate::fetch::{FileSource, HttpSource, PercentileSource, StatsFetchClient};

use super::types::RunPlan;

const OUTPUT_SUFFIX: &str = "_percentiles";

pub(crate) fn build_plan(args: RankcardArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    let (args, overrides) = apply_config(args, matches)?;
    build_plan_with(&args, &overrides)
}

pub(super) fn build_plan_with(args: &RankcardArgs, overrides: &ChartOverrides) -> AppResult<RunPlan> {
    let source = build_source(args)?;

    let metrics = overrides
        .metrics_for(args.page)
        .map_or_else(|| args.page.metrics(), <[_]>::to_vec);

    let mut layout = ChartLayout::for_page(args.page).with_slots(args.layout);
    if let Some(width) = args.chart_width {
        layout.chart_width = width;
    }
    if let Some(height) = args.chart_height {
        layout.chart_height = height;
    }
    if let Some(inset) = overrides.inset {
        layout.inset = inset;
    }
    let renderer = PercentileChartRenderer::new(layout).with_policy(args.out_of_range);

    let (out, format) = resolve_output(args, source.as_ref());

    Ok(RunPlan {
        page: args.page,
        source,
        metrics,
        renderer,
        out,
        format,
    })
}

fn apply_config(
    mut args: RankcardArgs,
    matches: &ArgMatches,
) -> AppResult<(RankcardArgs, ChartOverrides)> {
    let loaded_config = crate::config::load_config(args.config.as_deref())?;
    if let Some(config) = loaded_config {
        let overrides = crate::config::apply_config(&mut args, matches, &config)?;
        return Ok((args, overrides));
    }
    Ok((args, ChartOverrides::default()))
}

fn build_source(args: &RankcardArgs) -> AppResult<Box<dyn PercentileSource>> {
    if let Some(input) = args.input.as_ref() {
        return Ok(Box::new(FileSource::new(input.clone())));
    }

    let Some(subject) = args.subject.as_deref() else {
        tracing::error!("Missing input (set --subject or --input, or provide them in config).");
        return Err(AppError::validation(ValidationError::MissingInput));
    };
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(AppError::validation(ValidationError::EmptySubject));
    }

    let client = StatsFetchClient::new(&args.base_url, args.timeout)?;
    Ok(Box::new(HttpSource::new(
        client,
        args.page,
        subject.to_owned(),
    )))
}

fn resolve_output(args: &RankcardArgs, source: &dyn PercentileSource) -> (PathBuf, ExportFormat) {
    match args.out.as_ref() {
        Some(out) => {
            let format = args
                .format
                .unwrap_or_else(|| ExportFormat::from_path(out));
            (out.clone(), format)
        }
        None => {
            let format = args.format.unwrap_or_default();
            let name = format!(
                "{}{}.{}",
                file_slug(&source.describe()),
                OUTPUT_SUFFIX,
                format.extension()
            );
            (PathBuf::from(name), format)
        }
    }
}

/// Lowercase file-name stem with runs of anything but ASCII alphanumerics
/// collapsed to `_`.
pub(super) fn file_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "chart".to_owned()
    } else {
        slug.to_owned()
    }
}
