use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::metrics::PageKind;

use super::scale::PercentileScale;

pub const DEFAULT_CHART_WIDTH: f64 = 410.0;
pub const DEFAULT_INSET: f64 = 10.0;
/// Width-derived slots are one tenth of the chart width.
const WIDTH_SLOT_DIVISOR: f64 = 10.0;

/// How the vertical slot of each metric row is derived.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlotLayout {
    /// `y(i) = chart_width / 10 * i`, matching the dashboard pixel for pixel.
    #[default]
    #[value(name = "width")]
    #[serde(rename = "width")]
    WidthDerived,
    /// `y(i) = chart_height / (n + 1) * i`.
    #[value(name = "height")]
    #[serde(rename = "height")]
    HeightDerived,
}

/// Canvas geometry for a percentile chart.
///
/// Chart space runs from `0` to `chart_width`; the canvas adds `inset` on
/// every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub chart_width: f64,
    pub chart_height: f64,
    pub inset: f64,
    pub slots: SlotLayout,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::for_page(PageKind::Hitter)
    }
}

impl ChartLayout {
    #[must_use]
    pub const fn for_page(page: PageKind) -> Self {
        Self {
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: page.default_chart_height(),
            inset: DEFAULT_INSET,
            slots: SlotLayout::WidthDerived,
        }
    }

    #[must_use]
    pub const fn with_slots(mut self, slots: SlotLayout) -> Self {
        self.slots = slots;
        self
    }

    #[must_use]
    pub const fn scale(&self) -> PercentileScale {
        PercentileScale::new(self.chart_width)
    }

    /// Canvas size in whole pixels.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            to_pixels(self.chart_width + self.inset * 2.0),
            to_pixels(self.chart_height + self.inset * 2.0),
        )
    }

    /// Height of one metric row when `count` metrics are stacked.
    #[must_use]
    pub fn slot_height(&self, count: usize) -> f64 {
        match self.slots {
            SlotLayout::WidthDerived => self.chart_width / WIDTH_SLOT_DIVISOR,
            SlotLayout::HeightDerived => self.chart_height / count.saturating_add(1) as f64,
        }
    }

    /// Vertical position of the 1-indexed slot `index`.
    #[must_use]
    pub fn slot_y(&self, index: usize, count: usize) -> f64 {
        self.slot_height(count) * index as f64
    }
}

fn to_pixels(value: f64) -> u32 {
    value.round().max(1.0) as u32
}

/// A metric placed on the chart. `x` is in chart space.
#[derive(Debug, Clone, PartialEq)]
pub struct RankPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub percentile: f64,
}
