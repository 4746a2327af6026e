use std::path::{Path, PathBuf};

use clap::ValueEnum;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontDesc, FontFamily, FontStyle, TextStyle, WHITE};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{error, info};

use crate::error::{AppError, AppResult};

use super::drawing::{Drawing, FontSpec, ShapeKind};

const OUTLINE_STROKE: u32 = 1;

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    /// Picks PNG for `.png` paths and SVG for everything else.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => ExportFormat::Png,
            Some(_) | None => ExportFormat::Svg,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }
}

/// Serialises a drawing to an SVG document.
///
/// # Errors
///
/// Returns an error when the SVG backend rejects a shape.
pub fn render_svg(drawing: &Drawing) -> AppResult<String> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (drawing.width, drawing.height)).into_drawing_area();
        paint(&root, drawing)?;
        root.present()?;
    }
    Ok(svg)
}

fn render_png(drawing: &Drawing, path: &Path) -> AppResult<()> {
    let root = BitMapBackend::new(path, (drawing.width, drawing.height)).into_drawing_area();
    paint(&root, drawing).map_err(|source| AppError::Bitmap { source })?;
    root.present().map_err(|source| AppError::Bitmap { source })?;
    Ok(())
}

/// Writes a drawing to `path`, creating parent directories as needed.
///
/// PNG encoding runs on the blocking pool.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or the chart cannot
/// be encoded or written.
pub async fn write_chart(drawing: &Drawing, path: &Path, format: ExportFormat) -> AppResult<PathBuf> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty())
        && let Err(e) = fs::create_dir_all(parent).await
    {
        error!("Failed to create output directory '{}': {}", parent.display(), e);
        return Err(e.into());
    }

    match format {
        ExportFormat::Svg => {
            let svg = render_svg(drawing)?;
            fs::write(path, svg).await?;
        }
        ExportFormat::Png => {
            let drawing = drawing.clone();
            let target = path.to_path_buf();
            tokio::task::spawn_blocking(move || render_png(&drawing, &target)).await??;
        }
    }

    info!("Wrote percentile chart to {}", path.display());
    Ok(path.to_path_buf())
}

fn paint<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    drawing: &Drawing,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    area.fill(&WHITE)?;
    for shape in drawing.shapes() {
        match &shape.kind {
            ShapeKind::Line {
                from,
                to,
                color,
                width,
            } => {
                area.draw(&PathElement::new(
                    vec![pixel(*from), pixel(*to)],
                    color.stroke_width(*width),
                ))?;
            }
            ShapeKind::Circle {
                center,
                radius,
                fill,
                outline,
            } => {
                let radius = radius.round() as i32;
                area.draw(&Circle::new(pixel(*center), radius, fill.filled()))?;
                if let Some(outline) = outline {
                    area.draw(&Circle::new(
                        pixel(*center),
                        radius,
                        outline.stroke_width(OUTLINE_STROKE),
                    ))?;
                }
            }
            ShapeKind::Text {
                origin,
                content,
                font,
            } => {
                area.draw(&Text::new(content.as_str(), pixel(*origin), text_style(font)))?;
            }
        }
    }
    Ok(())
}

// Text is bottom-anchored, so SVG output sits half an x-height above the
// shape origin.
fn text_style(font: &FontSpec) -> TextStyle<'static> {
    let weight = if font.bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    FontDesc::new(FontFamily::Name(font.family), font.size, weight)
        .color(&font.color)
        .pos(Pos::new(HPos::Left, VPos::Bottom))
}

fn pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}
