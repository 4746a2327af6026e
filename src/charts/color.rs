use plotters::style::RGBColor;

/// ColorBrewer RdBu, dark red at `t = 0` through neutral to dark blue at `t = 1`.
const RDBU_STOPS: [(u8, u8, u8); 11] = [
    (0x67, 0x00, 0x1f),
    (0xb2, 0x18, 0x2b),
    (0xd6, 0x60, 0x4d),
    (0xf4, 0xa5, 0x82),
    (0xfd, 0xdb, 0xc7),
    (0xf7, 0xf7, 0xf7),
    (0xd1, 0xe5, 0xf0),
    (0x92, 0xc5, 0xde),
    (0x43, 0x93, 0xc3),
    (0x21, 0x66, 0xac),
    (0x05, 0x30, 0x61),
];

/// Continuous diverging colormap sampled by piecewise-linear interpolation
/// between fixed stops.
#[derive(Debug, Clone, Copy)]
pub struct DivergingScale {
    stops: &'static [(u8, u8, u8)],
}

impl Default for DivergingScale {
    fn default() -> Self {
        Self::red_blue()
    }
}

impl DivergingScale {
    #[must_use]
    pub const fn red_blue() -> Self {
        Self {
            stops: &RDBU_STOPS,
        }
    }

    /// Neutral color at `t = 0.5`.
    #[must_use]
    pub fn midpoint(self) -> RGBColor {
        self.sample(0.5)
    }

    /// Samples the scale at `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn sample(self, t: f64) -> RGBColor {
        let segments = self.stops.len().saturating_sub(1);
        let Some(last) = self.stops.last() else {
            return RGBColor(0, 0, 0);
        };
        if segments == 0 {
            return rgb(*last);
        }

        let position = t.clamp(0.0, 1.0) * segments as f64;
        let index = (position.floor() as usize).min(segments.saturating_sub(1));
        let frac = position - index as f64;
        match (self.stops.get(index), self.stops.get(index.saturating_add(1))) {
            (Some(from), Some(to)) => RGBColor(
                lerp(from.0, to.0, frac),
                lerp(from.1, to.1, frac),
                lerp(from.2, to.2, frac),
            ),
            _ => rgb(*last),
        }
    }
}

const fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

fn lerp(from: u8, to: u8, frac: f64) -> u8 {
    let start = f64::from(from);
    let value = start + (f64::from(to) - start) * frac;
    value.round().clamp(0.0, 255.0) as u8
}
