/// Linear map from the percentile domain `[0, 100]` to chart pixels `[0, width]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileScale {
    width: f64,
}

impl PercentileScale {
    pub const DOMAIN_MAX: f64 = 100.0;

    #[must_use]
    pub const fn new(width: f64) -> Self {
        Self { width }
    }

    #[must_use]
    pub const fn width(self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn x(self, percentile: f64) -> f64 {
        self.width * percentile / Self::DOMAIN_MAX
    }
}
