use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{GameMode, RatePercent};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunSummaryError {
    #[error("ended_at is before started_at")]
    InvalidTimeRange,

    #[error("successes ({successes}) exceed tries ({tries})")]
    CountMismatch { tries: u32, successes: u32 },
}

//
// ─── SESSION STATE ────────────────────────────────────────────────────────────
//

/// Mutable state for one player session: mode, rates, streak, and cumulative
/// statistics.
///
/// One instance lives for the whole process. The presentation layer owns it
/// (through the services flow) and passes references down; there is no global
/// lookup. Fields reset on mode change or run start exactly as the individual
/// operations describe, never behind the caller's back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    mode: GameMode,
    configured_rate: RatePercent,
    actual_rate: RatePercent,
    user_guess: RatePercent,
    streak: u32,
    total_tries: u32,
    total_successes: u32,
    last_result: Option<bool>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the game mode.
    ///
    /// Entering `Guess` draws a fresh hidden rate, uniformly from `[1, 100]`.
    /// That is the only redraw point; trials never touch the rate.
    pub fn set_mode<R: Rng + ?Sized>(&mut self, mode: GameMode, rng: &mut R) {
        self.mode = mode;
        if mode == GameMode::Guess {
            self.actual_rate = RatePercent::draw(rng);
        }
    }

    /// Stores the experienced-mode rate, clamped into `[1, 100]`.
    pub fn set_configured_rate(&mut self, percent: i64) {
        self.configured_rate = RatePercent::clamped(percent);
    }

    /// Stores the player's guess, clamped into `[1, 100]`.
    pub fn set_user_guess(&mut self, percent: i64) {
        self.user_guess = RatePercent::clamped(percent);
    }

    /// Begins a fresh run: the streak resets, cumulative totals and all
    /// rates stay.
    pub fn start_run(&mut self) {
        self.streak = 0;
    }

    /// The rate the trial engine plays against: the configured rate in
    /// experience mode, the hidden rate in guess mode, never the guess.
    ///
    /// `None` before a mode is selected; callers should refuse the trial.
    #[must_use]
    pub fn resolve_active_rate(&self) -> Option<RatePercent> {
        match self.mode {
            GameMode::Experience => Some(self.configured_rate),
            GameMode::Guess => Some(self.actual_rate),
            GameMode::None => None,
        }
    }

    /// Records one trial outcome. The single point of truth for streak and
    /// statistics; call exactly once per trial.
    pub fn apply_trial_result(&mut self, success: bool) {
        self.last_result = Some(success);
        self.total_tries = self.total_tries.saturating_add(1);
        if success {
            self.total_successes = self.total_successes.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
        } else {
            self.streak = 0;
        }
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn configured_rate(&self) -> RatePercent {
        self.configured_rate
    }

    /// The hidden guess-mode rate. Presentation keeps this off-screen until
    /// the reveal.
    #[must_use]
    pub fn actual_rate(&self) -> RatePercent {
        self.actual_rate
    }

    #[must_use]
    pub fn user_guess(&self) -> RatePercent {
        self.user_guess
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn total_tries(&self) -> u32 {
        self.total_tries
    }

    #[must_use]
    pub fn total_successes(&self) -> u32 {
        self.total_successes
    }

    /// Outcome of the most recent trial, `None` before the first one.
    #[must_use]
    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }

    /// Integer percent of successes over all tries so far, 0 with no tries.
    #[must_use]
    pub fn observed_success_percent(&self) -> u32 {
        if self.total_tries == 0 {
            return 0;
        }
        (u64::from(self.total_successes) * 100 / u64::from(self.total_tries)) as u32
    }

    /// Absolute distance between the guess and the hidden rate, in
    /// percentage points.
    #[must_use]
    pub fn guess_miss(&self) -> u8 {
        self.user_guess.value().abs_diff(self.actual_rate.value())
    }
}

//
// ─── RUN SUMMARY ──────────────────────────────────────────────────────────────
//

/// Aggregate summary for a finished run (a failure was observed).
///
/// `streak` is the count of consecutive successes the run achieved before
/// the failing trial; the totals are cumulative over the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    mode: GameMode,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    streak: u32,
    total_tries: u32,
    total_successes: u32,
}

impl RunSummary {
    /// Builds a validated summary.
    ///
    /// # Errors
    ///
    /// Returns `RunSummaryError::InvalidTimeRange` if `ended_at` is before
    /// `started_at`, and `RunSummaryError::CountMismatch` if the successes
    /// exceed the tries.
    pub fn new(
        mode: GameMode,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        streak: u32,
        total_tries: u32,
        total_successes: u32,
    ) -> Result<Self, RunSummaryError> {
        if ended_at < started_at {
            return Err(RunSummaryError::InvalidTimeRange);
        }
        if total_successes > total_tries {
            return Err(RunSummaryError::CountMismatch {
                tries: total_tries,
                successes: total_successes,
            });
        }

        Ok(Self {
            mode,
            started_at,
            ended_at,
            streak,
            total_tries,
            total_successes,
        })
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn total_tries(&self) -> u32 {
        self.total_tries
    }

    #[must_use]
    pub fn total_successes(&self) -> u32 {
        self.total_successes
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{fixed_rng, seeded_rng};
    use crate::time::fixed_now;

    #[test]
    fn successes_build_a_streak_and_one_failure_clears_it() {
        let mut state = SessionState::new();
        state.start_run();

        for expected in 1..=3 {
            state.apply_trial_result(true);
            assert_eq!(state.streak(), expected);
        }
        assert_eq!(state.total_tries(), 3);
        assert_eq!(state.total_successes(), 3);

        state.apply_trial_result(false);
        assert_eq!(state.streak(), 0);
        assert_eq!(state.total_tries(), 4);
        assert_eq!(state.total_successes(), 3);
        assert_eq!(state.last_result(), Some(false));
    }

    #[test]
    fn start_run_keeps_cumulative_totals() {
        let mut state = SessionState::new();
        state.apply_trial_result(true);
        state.apply_trial_result(false);

        state.start_run();

        assert_eq!(state.streak(), 0);
        assert_eq!(state.total_tries(), 2);
        assert_eq!(state.total_successes(), 1);
    }

    #[test]
    fn totals_never_invert() {
        let mut state = SessionState::new();
        let mut rng = fixed_rng();
        for _ in 0..1_000 {
            state.apply_trial_result(rng.random::<bool>());
            assert!(state.total_successes() <= state.total_tries());
        }
    }

    #[test]
    fn setters_clamp_out_of_range_input() {
        let mut state = SessionState::new();
        state.set_configured_rate(250);
        state.set_user_guess(-3);

        assert_eq!(state.configured_rate().value(), 100);
        assert_eq!(state.user_guess().value(), 1);
    }

    #[test]
    fn experience_mode_resolves_the_configured_rate() {
        let mut state = SessionState::new();
        let mut rng = fixed_rng();
        state.set_mode(GameMode::Experience, &mut rng);
        state.set_configured_rate(80);

        assert_eq!(state.resolve_active_rate().unwrap().value(), 80);
    }

    #[test]
    fn guess_mode_resolves_the_hidden_rate_not_the_guess() {
        let mut state = SessionState::new();
        let mut rng = fixed_rng();
        state.set_mode(GameMode::Guess, &mut rng);
        state.set_user_guess(7);

        let drawn = state.actual_rate();
        assert!((RatePercent::MIN..=RatePercent::MAX).contains(&drawn.value()));
        assert_eq!(state.resolve_active_rate(), Some(drawn));
    }

    #[test]
    fn no_mode_resolves_nothing() {
        assert_eq!(SessionState::new().resolve_active_rate(), None);
    }

    #[test]
    fn entering_guess_mode_redraws_each_time() {
        let mut state = SessionState::new();
        let mut rng = seeded_rng(11);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            state.set_mode(GameMode::Guess, &mut rng);
            seen.insert(state.actual_rate().value());
        }
        assert!(seen.len() > 1, "100 redraws produced a single value");
    }

    #[test]
    fn observed_percent_uses_integer_division() {
        let mut state = SessionState::new();
        assert_eq!(state.observed_success_percent(), 0);

        state.apply_trial_result(true);
        state.apply_trial_result(true);
        state.apply_trial_result(false);
        assert_eq!(state.observed_success_percent(), 66);
    }

    #[test]
    fn guess_miss_is_symmetric() {
        let mut state = SessionState::new();
        let mut rng = fixed_rng();
        state.set_mode(GameMode::Guess, &mut rng);

        let actual = state.actual_rate().value();
        state.set_user_guess(i64::from(actual) + 10);
        // Clamping can shrink the distance near 100.
        let expected = state.user_guess().value().abs_diff(actual);
        assert_eq!(state.guess_miss(), expected);
    }

    #[test]
    fn summary_validates_time_range_and_counts() {
        let now = fixed_now();
        let earlier = now - chrono::Duration::seconds(90);

        let err = RunSummary::new(GameMode::Experience, now, earlier, 0, 1, 0).unwrap_err();
        assert_eq!(err, RunSummaryError::InvalidTimeRange);

        let err = RunSummary::new(GameMode::Experience, earlier, now, 0, 2, 3).unwrap_err();
        assert_eq!(
            err,
            RunSummaryError::CountMismatch {
                tries: 2,
                successes: 3
            }
        );

        let summary = RunSummary::new(GameMode::Guess, earlier, now, 4, 10, 8).unwrap();
        assert_eq!(summary.streak(), 4);
        assert_eq!(summary.total_tries(), 10);
        assert_eq!(summary.total_successes(), 8);
    }
}
