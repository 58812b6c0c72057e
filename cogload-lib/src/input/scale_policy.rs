/// The closed interval that subjective ratings must fall within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePolicy {
    pub min: f64,
    pub max: f64,
}

impl ScalePolicy {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `value` is a finite number inside `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self::new(1.0, 5.0)
    }
}
