use serde::Serialize;

use door_core::model::{GameMode, RatePercent};

/// In-play HUD line: current streak and cumulative tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayView {
    pub streak: u32,
    pub total_tries: u32,
}

/// Outcome of comparing the player's guess against the hidden rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuessReveal {
    pub guess: RatePercent,
    pub actual: RatePercent,
    /// Absolute distance between guess and actual, in percentage points.
    pub miss: u8,
}

/// Mode-specific lines of the result screen.
///
/// In guess mode the hidden rate stays out of the view until the player
/// confirms a guess; `reveal` flips to `Some` at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultDetail {
    Experience {
        configured: RatePercent,
    },
    Guess {
        guess: RatePercent,
        reveal: Option<GuessReveal>,
    },
}

/// Everything the result screen shows.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// The front-end formats labels, percent signs, and layout as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultView {
    /// Outcome of the trial that ended the run.
    pub success: bool,
    pub mode: GameMode,
    /// Streak achieved by the run that just ended.
    pub streak: u32,
    pub total_tries: u32,
    pub total_successes: u32,
    /// Integer percent of successes over all tries so far.
    pub success_percent: u32,
    pub detail: ResultDetail,
}
