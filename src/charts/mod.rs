//! Percentile-rank chart rendering.
//!
//! A chart is a vertical stack of horizontal percentile scales, one per
//! metric. Each scale carries grey reference marks at 0/50/100, a rank marker
//! colored on a red-blue diverging scale, the metric label and the floored
//! percentile. [`PercentileChartRenderer`] builds the scene as a [`Drawing`]
//! whose shapes are tagged by [`Role`]; [`export`] paints it with plotters.
mod color;
mod drawing;
pub mod export;
mod layout;
mod renderer;
mod scale;


pub use color::DivergingScale;
pub use drawing::{Drawing, FontSpec, Role, Shape, ShapeKind};
pub use export::{ExportFormat, render_svg, write_chart};
pub use layout::{ChartLayout, DEFAULT_CHART_WIDTH, DEFAULT_INSET, RankPoint, SlotLayout};
pub use renderer::{
    MARKER_RADIUS, PercentileChartRenderer, digit_offset, display_percentile, percent_text_color,
    rank_color,
};
pub use scale::PercentileScale;
