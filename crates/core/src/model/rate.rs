use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer continuation rate in percent, always within `[1, 100]`.
///
/// Construction clamps out-of-range input instead of rejecting it, so
/// sliders and free-form text input feed straight into `clamped`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RatePercent(u8);

impl RatePercent {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Clamps `value` into `[1, 100]` and wraps it.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    /// Draws a rate uniformly from `[1, 100]`, each value equally likely.
    #[must_use]
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(Self::MIN..=Self::MAX))
    }

    /// Returns the underlying percent value.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The rate as a probability in `[0.01, 1.0]` for the trial engine.
    #[must_use]
    pub fn as_probability(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for RatePercent {
    fn default() -> Self {
        Self(50)
    }
}

impl fmt::Debug for RatePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RatePercent({})", self.0)
    }
}

impl fmt::Display for RatePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
