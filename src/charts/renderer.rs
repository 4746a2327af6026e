use plotters::style::{BLACK, RGBColor, WHITE};
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::metrics::{MetricSpec, OutOfRange, PercentileRow};

use super::color::DivergingScale;
use super::drawing::{Drawing, FontSpec, Role, Shape, ShapeKind};
use super::layout::{ChartLayout, RankPoint};

const GRID_COLOR: RGBColor = RGBColor(155, 155, 155);
const GRID_STROKE: u32 = 2;
const CONNECTOR_STROKE: u32 = 3;
const DECORATION_PERCENTILES: [f64; 3] = [0.0, 50.0, 100.0];
const DECORATION_RADIUS: f64 = 3.0;
pub const MARKER_RADIUS: f64 = 11.0;
const CONNECTOR_GAP: f64 = 1.5;
const LABEL_X: f64 = 5.0;
const LABEL_RISE: f64 = 15.0;
const PERCENT_TEXT_DROP: f64 = 3.0;
const FONT_FAMILY: &str = "DejaVu Sans Mono";
// .8rem and .7rem at a 16px root.
const LABEL_FONT_SIZE: f64 = 12.8;
const PERCENT_FONT_SIZE: f64 = 11.2;
const LOW_CONTRAST_MAX: u32 = 30;
const HIGH_CONTRAST_MIN: u32 = 70;

/// Integer percentile shown in the marker and used for color decisions.
#[must_use]
pub fn display_percentile(percentile: f64) -> u32 {
    percentile.floor().clamp(0.0, 100.0) as u32
}

/// Marker fill for a percentile: cool for low ranks, warm for high ones.
#[must_use]
pub fn rank_color(percentile: f64) -> RGBColor {
    let floored = f64::from(display_percentile(percentile));
    DivergingScale::red_blue().sample(1.0 - floored / 100.0)
}

/// White text on the saturated ends of the scale, black in the pale middle.
#[must_use]
pub const fn percent_text_color(floored: u32) -> RGBColor {
    if floored >= HIGH_CONTRAST_MIN || floored <= LOW_CONTRAST_MAX {
        WHITE
    } else {
        BLACK
    }
}

/// Horizontal nudge that centres the rank number inside its marker.
#[must_use]
pub const fn digit_offset(floored: u32) -> f64 {
    match digit_count(floored) {
        1 => 7.0,
        2 => 4.0,
        _ => 0.0,
    }
}

const fn digit_count(mut value: u32) -> u32 {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// Draws a vertical stack of percentile scales, one per metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileChartRenderer {
    layout: ChartLayout,
    policy: OutOfRange,
}

impl PercentileChartRenderer {
    #[must_use]
    pub const fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            policy: OutOfRange::Reject,
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: OutOfRange) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Places every metric on the chart without drawing anything.
    ///
    /// # Errors
    ///
    /// Returns `EmptyMetricSpec` for an empty catalogue, `MissingMetric` or
    /// `InvalidMetricValue` for the first metric the row cannot satisfy.
    pub fn rank_points(
        &self,
        specs: &[MetricSpec],
        row: &PercentileRow,
    ) -> Result<Vec<RankPoint>, RenderError> {
        if specs.is_empty() {
            return Err(RenderError::EmptyMetricSpec);
        }
        let scale = self.layout.scale();
        let count = specs.len();
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let raw = row.percentile(&spec.key)?;
                let percentile = self.policy.apply(&spec.key, raw)?;
                Ok(RankPoint {
                    label: spec.label.clone(),
                    x: scale.x(percentile),
                    y: self.layout.slot_y(index.saturating_add(1), count),
                    percentile,
                })
            })
            .collect()
    }

    /// Renders the chart for `specs` using values from `row`.
    ///
    /// # Errors
    ///
    /// Fails without producing any shapes when [`Self::rank_points`] fails.
    pub fn render(&self, specs: &[MetricSpec], row: &PercentileRow) -> Result<Drawing, RenderError> {
        let points = self.rank_points(specs, row)?;
        let canvas = self.layout.canvas_size();
        if let Some(last) = points.last()
            && last.y + MARKER_RADIUS > f64::from(canvas.1)
        {
            warn!(
                metrics = points.len(),
                canvas_height = canvas.1,
                "Last metric row falls outside the canvas"
            );
        }

        let mut shapes = Vec::with_capacity(points.len().saturating_mul(8));
        self.push_gridlines(&points, &mut shapes);
        self.push_decorations(&points, &mut shapes);
        self.push_markers(&points, &mut shapes);
        push_labels(&points, &mut shapes);
        push_percent_text(&points, &mut shapes);
        push_connectors(&points, &mut shapes);

        debug!(
            metrics = points.len(),
            shapes = shapes.len(),
            width = canvas.0,
            height = canvas.1,
            "Rendered percentile chart"
        );
        Ok(Drawing::new(canvas, points, shapes))
    }

    fn push_gridlines(&self, points: &[RankPoint], shapes: &mut Vec<Shape>) {
        let left = self.layout.inset;
        let right = left + self.layout.chart_width;
        for (metric, point) in points.iter().enumerate() {
            shapes.push(Shape {
                role: Role::Gridline,
                metric,
                kind: ShapeKind::Line {
                    from: (left, point.y),
                    to: (right, point.y),
                    color: GRID_COLOR,
                    width: GRID_STROKE,
                },
            });
        }
    }

    fn push_decorations(&self, points: &[RankPoint], shapes: &mut Vec<Shape>) {
        let scale = self.layout.scale();
        for (metric, point) in points.iter().enumerate() {
            for percentile in DECORATION_PERCENTILES {
                shapes.push(Shape {
                    role: Role::Decoration,
                    metric,
                    kind: ShapeKind::Circle {
                        center: (self.layout.inset + scale.x(percentile), point.y),
                        radius: DECORATION_RADIUS,
                        fill: GRID_COLOR,
                        outline: None,
                    },
                });
            }
        }
    }

    fn push_markers(&self, points: &[RankPoint], shapes: &mut Vec<Shape>) {
        for (metric, point) in points.iter().enumerate() {
            shapes.push(Shape {
                role: Role::RankMarker,
                metric,
                kind: ShapeKind::Circle {
                    center: (self.layout.inset + point.x, point.y),
                    radius: MARKER_RADIUS,
                    fill: rank_color(point.percentile),
                    outline: Some(BLACK),
                },
            });
        }
    }
}

fn push_labels(points: &[RankPoint], shapes: &mut Vec<Shape>) {
    for (metric, point) in points.iter().enumerate() {
        shapes.push(Shape {
            role: Role::Label,
            metric,
            kind: ShapeKind::Text {
                origin: (LABEL_X, point.y - LABEL_RISE),
                content: point.label.clone(),
                font: FontSpec {
                    family: FONT_FAMILY,
                    size: LABEL_FONT_SIZE,
                    bold: false,
                    color: BLACK,
                },
            },
        });
    }
}

// Text origins and connectors stay in chart space; the inset is absorbed by
// the digit offset and the connector gap.
fn push_percent_text(points: &[RankPoint], shapes: &mut Vec<Shape>) {
    for (metric, point) in points.iter().enumerate() {
        let floored = display_percentile(point.percentile);
        shapes.push(Shape {
            role: Role::PercentText,
            metric,
            kind: ShapeKind::Text {
                origin: (point.x + digit_offset(floored), point.y + PERCENT_TEXT_DROP),
                content: floored.to_string(),
                font: FontSpec {
                    family: FONT_FAMILY,
                    size: PERCENT_FONT_SIZE,
                    bold: true,
                    color: percent_text_color(floored),
                },
            },
        });
    }
}

fn push_connectors(points: &[RankPoint], shapes: &mut Vec<Shape>) {
    for (metric, point) in points.iter().enumerate() {
        shapes.push(Shape {
            role: Role::Connector,
            metric,
            kind: ShapeKind::Line {
                from: (0.0, point.y),
                to: ((point.x - CONNECTOR_GAP).max(0.0), point.y),
                color: rank_color(point.percentile),
                width: CONNECTOR_STROKE,
            },
        });
    }
}
