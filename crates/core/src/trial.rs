use rand::Rng;

/// Success judgement for a single trial: one independent uniform draw.
///
/// Every call draws fresh; there is no correlation with earlier calls, no
/// streak compensation, and no adaptive bias.
pub struct TrialEngine;

impl TrialEngine {
    /// Evaluates one trial at the given success probability.
    ///
    /// `probability` is clamped to `[0.0, 1.0]`; NaN counts as 0. The draw
    /// is uniform in `[0, 1)`, so a probability of exactly 0 never succeeds
    /// and a probability of exactly 1 always does.
    #[must_use]
    pub fn evaluate<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
        let p = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        rng.random::<f64>() < p
    }
}
