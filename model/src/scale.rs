/// Circle radius in pixels, from no traffic to the busiest station.
pub const RADIUS_RANGE: (f64, f64) = (0.0, 25.0);

/// Maps [0, max] onto a range by square root, so circle area tracks the value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
    max: f64,
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(max: usize, range: (f64, f64)) -> Self {
        Self {
            max: max as f64,
            range,
        }
    }

    pub fn radius(max: usize) -> Self {
        Self::new(max, RADIUS_RANGE)
    }

    pub fn eval(&self, value: usize) -> f64 {
        let (low, high) = self.range;
        if self.max <= 0.0 {
            return low;
        }
        low + (high - low) * (value as f64).sqrt() / self.max.sqrt()
    }
}
