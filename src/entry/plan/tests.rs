use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::tempdir;

use super::build::{build_plan_with, file_slug};
use super::execute_plan;
use crate::args::RankcardArgs;
use crate::charts::ExportFormat;
use crate::config::ChartOverrides;
use crate::error::{AppError, RenderError, ValidationError};
use crate::metrics::{MetricSpec, PageKind};

fn parse(cli: &[&str]) -> Result<RankcardArgs, String> {
    RankcardArgs::try_parse_from(cli).map_err(|err| format!("parse args failed: {}", err))
}

#[test]
fn file_input_plan_uses_builtin_catalogue_and_default_output() -> Result<(), String> {
    let args = parse(&["rankcard", "--page", "pitcher", "--input", "data/Jane Doe.json"])?;
    let plan = build_plan_with(&args, &ChartOverrides::default()).map_err(|err| err.to_string())?;

    if plan.page != PageKind::Pitcher {
        return Err("Expected pitcher plan".to_owned());
    }
    if plan.metrics != PageKind::Pitcher.metrics() {
        return Err("Expected built-in pitcher metrics".to_owned());
    }
    if plan.out != Path::new("jane_doe_percentiles.svg") {
        return Err(format!("Unexpected default output: {}", plan.out.display()));
    }
    if plan.format != ExportFormat::Svg {
        return Err("Expected SVG by default".to_owned());
    }
    let layout = plan.renderer.layout();
    if layout.canvas_size() != (430, 555) {
        return Err(format!("Unexpected canvas: {:?}", layout.canvas_size()));
    }
    Ok(())
}

#[test]
fn plan_applies_dimension_and_catalogue_overrides() -> Result<(), String> {
    let args = parse(&[
        "rankcard",
        "--input",
        "rows.json",
        "--chart-width",
        "200",
        "--chart-height",
        "300",
        "--out",
        "charts/card.PNG",
    ])?;
    let custom = vec![MetricSpec::new("xBA_percentile", "xBA")];
    let overrides = ChartOverrides {
        inset: Some(0.0),
        hitter_metrics: Some(custom.clone()),
        pitcher_metrics: None,
    };
    let plan = build_plan_with(&args, &overrides).map_err(|err| err.to_string())?;

    if plan.metrics != custom {
        return Err(format!("Unexpected metrics: {:?}", plan.metrics));
    }
    if plan.renderer.layout().canvas_size() != (200, 300) {
        return Err(format!(
            "Unexpected canvas: {:?}",
            plan.renderer.layout().canvas_size()
        ));
    }
    if plan.format != ExportFormat::Png {
        return Err("Expected format inferred from --out".to_owned());
    }
    if plan.out != PathBuf::from("charts/card.PNG") {
        return Err("Expected --out to be kept verbatim".to_owned());
    }
    Ok(())
}

#[test]
fn plan_requires_subject_or_input() -> Result<(), String> {
    let args = parse(&["rankcard"])?;
    match build_plan_with(&args, &ChartOverrides::default()) {
        Err(AppError::Validation(ValidationError::MissingInput)) => {}
        Err(err) => return Err(format!("Expected MissingInput, got {}", err)),
        Ok(_) => return Err("Expected MissingInput".to_owned()),
    }

    let blank = parse(&["rankcard", "--subject", "   "])?;
    match build_plan_with(&blank, &ChartOverrides::default()) {
        Err(AppError::Validation(ValidationError::EmptySubject)) => Ok(()),
        Err(err) => Err(format!("Expected EmptySubject, got {}", err)),
        Ok(_) => Err("Expected EmptySubject".to_owned()),
    }
}

#[test]
fn subject_plan_names_output_after_player() -> Result<(), String> {
    let args = parse(&["rankcard", "--subject", "José Ramírez", "--format", "png"])?;
    let plan = build_plan_with(&args, &ChartOverrides::default()).map_err(|err| err.to_string())?;
    if plan.out != Path::new("jos_ram_rez_percentiles.png") {
        return Err(format!("Unexpected output: {}", plan.out.display()));
    }
    Ok(())
}

#[test]
fn file_slug_collapses_separators() -> Result<(), String> {
    let cases = [
        ("Jane Doe", "jane_doe"),
        ("  O'Neil  Cruz ", "o_neil_cruz"),
        ("---", "chart"),
    ];
    for (input, expected) in cases {
        let slug = file_slug(input);
        if slug != expected {
            return Err(format!("Slug for '{}' was '{}'", input, slug));
        }
    }
    Ok(())
}

#[test]
fn execute_plan_writes_svg_from_file_input() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let input = dir.path().join("rows.json");
    std::fs::write(&input, r#"[{"xBA_percentile": 75}]"#)
        .map_err(|err| format!("write failed: {}", err))?;
    let out = dir.path().join("nested").join("card.svg");

    let input_arg = input.display().to_string();
    let out_arg = out.display().to_string();
    let args = parse(&["rankcard", "--input", input_arg.as_str(), "--out", out_arg.as_str()])?;
    let overrides = ChartOverrides {
        hitter_metrics: Some(vec![MetricSpec::new("xBA_percentile", "xBA")]),
        ..ChartOverrides::default()
    };
    let plan = build_plan_with(&args, &overrides).map_err(|err| err.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("runtime failed: {}", err))?;
    runtime
        .block_on(execute_plan(plan))
        .map_err(|err| err.to_string())?;

    let svg = std::fs::read_to_string(&out).map_err(|err| format!("read failed: {}", err))?;
    if !svg.contains("<svg") || !svg.contains("xBA") {
        return Err("Expected SVG with the metric label".to_owned());
    }
    Ok(())
}

#[test]
fn execute_plan_fails_on_missing_metric_without_writing() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let input = dir.path().join("rows.json");
    std::fs::write(&input, r#"{"xBA_percentile": 75}"#)
        .map_err(|err| format!("write failed: {}", err))?;
    let out = dir.path().join("card.svg");

    let input_arg = input.display().to_string();
    let out_arg = out.display().to_string();
    let args = parse(&["rankcard", "--input", input_arg.as_str(), "--out", out_arg.as_str()])?;
    let plan = build_plan_with(&args, &ChartOverrides::default()).map_err(|err| err.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("runtime failed: {}", err))?;
    match runtime.block_on(execute_plan(plan)) {
        Err(AppError::Render(RenderError::MissingMetric { key })) if key == "xwOBA_percentile" => {}
        other => return Err(format!("Expected MissingMetric, got {:?}", other)),
    }
    if out.exists() {
        return Err("No chart should be written on failure".to_owned());
    }
    Ok(())
}
