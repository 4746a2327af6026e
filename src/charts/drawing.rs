use plotters::style::RGBColor;

use super::layout::RankPoint;

/// Semantic role of a shape, so callers can query the drawing by purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Gridline,
    Decoration,
    RankMarker,
    Label,
    PercentText,
    Connector,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: &'static str,
    pub size: f64,
    pub bold: bool,
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: RGBColor,
        width: u32,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        fill: RGBColor,
        outline: Option<RGBColor>,
    },
    Text {
        origin: (f64, f64),
        content: String,
        font: FontSpec,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub role: Role,
    /// Zero-based position of the metric this shape belongs to.
    pub metric: usize,
    pub kind: ShapeKind,
}

impl Shape {
    #[must_use]
    pub const fn center(&self) -> Option<(f64, f64)> {
        match &self.kind {
            ShapeKind::Circle { center, .. } => Some(*center),
            ShapeKind::Line { .. } | ShapeKind::Text { .. } => None,
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Text { content, .. } => Some(content.as_str()),
            ShapeKind::Line { .. } | ShapeKind::Circle { .. } => None,
        }
    }

    /// Fill of a circle, stroke of a line, or text color.
    #[must_use]
    pub const fn color(&self) -> RGBColor {
        match &self.kind {
            ShapeKind::Line { color, .. } => *color,
            ShapeKind::Circle { fill, .. } => *fill,
            ShapeKind::Text { font, .. } => font.color,
        }
    }
}

/// A finished vector scene: canvas size, placed rank points and shapes in
/// paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: u32,
    pub height: u32,
    points: Vec<RankPoint>,
    shapes: Vec<Shape>,
}

impl Drawing {
    pub(super) const fn new(
        (width, height): (u32, u32),
        points: Vec<RankPoint>,
        shapes: Vec<Shape>,
    ) -> Self {
        Self {
            width,
            height,
            points,
            shapes,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[RankPoint] {
        &self.points
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().filter(move |shape| shape.role == role)
    }

    #[must_use]
    pub fn count(&self, role: Role) -> usize {
        self.with_role(role).count()
    }
}
