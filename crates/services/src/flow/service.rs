use chrono::{DateTime, Utc};
use rand::rngs::StdRng;

use door_core::model::{GameMode, RunSummary, SessionState};
use door_core::rng::{os_rng, seeded_rng};
use door_core::{Clock, TrialEngine};

use super::screen::Screen;
use super::view::{GuessReveal, PlayView, ResultDetail, ResultView};
use crate::error::FlowError;

//
// ─── TRIAL OUTCOME ────────────────────────────────────────────────────────────
//

/// Result of a single door attempt within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOutcome {
    pub success: bool,
    /// Streak after this attempt (0 on failure).
    pub streak: u32,
    /// True when the attempt failed and the flow moved to the result screen.
    pub run_over: bool,
}

//
// ─── GAME FLOW ────────────────────────────────────────────────────────────────
//

/// Screen state machine over a single `SessionState`.
///
/// Owns the session, the time source, and the RNG; the presentation layer
/// holds one `GameFlow` and calls these operations in response to input, in
/// the order the screens prescribe. A call from the wrong screen returns a
/// `FlowError` and leaves all state untouched.
pub struct GameFlow {
    clock: Clock,
    rng: StdRng,
    state: SessionState,
    screen: Screen,
    run_started_at: DateTime<Utc>,
    last_summary: Option<RunSummary>,
    guess_revealed: bool,
}

impl GameFlow {
    /// Creates a flow on the title screen with an entropy-seeded RNG.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::with_rng(clock, os_rng())
    }

    /// Creates a flow with a deterministic RNG, for tests and replays.
    #[must_use]
    pub fn seeded(clock: Clock, seed: u64) -> Self {
        Self::with_rng(clock, seeded_rng(seed))
    }

    fn with_rng(clock: Clock, rng: StdRng) -> Self {
        let run_started_at = clock.now();
        Self {
            clock,
            rng,
            state: SessionState::new(),
            screen: Screen::Title,
            run_started_at,
            last_summary: None,
            guess_revealed: false,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Summary of the most recent finished run, if any run has failed yet.
    #[must_use]
    pub fn last_run_summary(&self) -> Option<&RunSummary> {
        self.last_summary.as_ref()
    }

    fn expect_screen(&self, expected: Screen) -> Result<(), FlowError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(FlowError::WrongScreen {
                expected,
                actual: self.screen,
            })
        }
    }

    /// Leaves the title screen for mode selection, forcing the mode back to
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the title screen.
    pub fn start(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Title)?;
        self.state.set_mode(GameMode::None, &mut self.rng);
        self.screen = Screen::ModeSelect;
        Ok(())
    }

    /// Picks experience mode and moves on to rate setting.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the mode-select screen.
    pub fn choose_experience(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::ModeSelect)?;
        self.state.set_mode(GameMode::Experience, &mut self.rng);
        self.screen = Screen::RateSetting;
        Ok(())
    }

    /// Picks guess mode: draws a fresh hidden rate and starts playing
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the mode-select screen.
    pub fn choose_guess(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::ModeSelect)?;
        self.state.set_mode(GameMode::Guess, &mut self.rng);
        self.begin_run();
        Ok(())
    }

    /// Commits the experienced rate (clamped into `[1, 100]`) and starts
    /// playing.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the rate-setting screen.
    pub fn commit_rate(&mut self, percent: i64) -> Result<(), FlowError> {
        self.expect_screen(Screen::RateSetting)?;
        self.state.set_configured_rate(percent);
        self.begin_run();
        Ok(())
    }

    /// One door attempt: resolve the active rate, draw, record. Success
    /// stays on the play screen; failure ends the run and moves to the
    /// result screen.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the play screen and
    /// `FlowError::ModeNotSelected` if no mode is active (unreachable
    /// through the screen machine itself).
    pub fn open_door(&mut self) -> Result<TrialOutcome, FlowError> {
        self.expect_screen(Screen::Play)?;
        let rate = self
            .state
            .resolve_active_rate()
            .ok_or(FlowError::ModeNotSelected)?;

        // The streak the run ends with, read before a failure zeroes it.
        let ended_streak = self.state.streak();
        let success = TrialEngine::evaluate(&mut self.rng, rate.as_probability());
        self.state.apply_trial_result(success);

        if !success {
            let ended_at = self.clock.now();
            let summary = RunSummary::new(
                self.state.mode(),
                self.run_started_at,
                ended_at,
                ended_streak,
                self.state.total_tries(),
                self.state.total_successes(),
            )?;
            self.last_summary = Some(summary);
            self.screen = Screen::Result;
        }

        Ok(TrialOutcome {
            success,
            streak: self.state.streak(),
            run_over: !success,
        })
    }

    /// Updates the player's guess, clamped into `[1, 100]`. Allowed any time
    /// in guess mode until the reveal locks it.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NotGuessMode` outside guess mode and
    /// `FlowError::AlreadyRevealed` after `confirm_guess`.
    pub fn set_guess(&mut self, percent: i64) -> Result<(), FlowError> {
        if self.state.mode() != GameMode::Guess {
            return Err(FlowError::NotGuessMode);
        }
        if self.guess_revealed {
            return Err(FlowError::AlreadyRevealed);
        }
        self.state.set_user_guess(percent);
        Ok(())
    }

    /// Locks the guess and reveals the hidden rate, once per run.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the result screen,
    /// `FlowError::NotGuessMode` outside guess mode, and
    /// `FlowError::AlreadyRevealed` on a second call.
    pub fn confirm_guess(&mut self) -> Result<GuessReveal, FlowError> {
        self.expect_screen(Screen::Result)?;
        if self.state.mode() != GameMode::Guess {
            return Err(FlowError::NotGuessMode);
        }
        if self.guess_revealed {
            return Err(FlowError::AlreadyRevealed);
        }
        self.guess_revealed = true;
        Ok(self.reveal())
    }

    /// Plays the same mode again. A guess retry re-enters the mode and so
    /// re-draws the hidden rate; an experience retry keeps the configured
    /// rate.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the result screen.
    pub fn retry(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Result)?;
        if self.state.mode() == GameMode::Guess {
            self.state.set_mode(GameMode::Guess, &mut self.rng);
        }
        self.begin_run();
        Ok(())
    }

    /// Returns to mode selection; no session state resets until the next
    /// mode is picked.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the result screen.
    pub fn back_to_mode_select(&mut self) -> Result<(), FlowError> {
        self.expect_screen(Screen::Result)?;
        self.screen = Screen::ModeSelect;
        Ok(())
    }

    fn begin_run(&mut self) {
        self.state.start_run();
        self.run_started_at = self.clock.now();
        self.guess_revealed = false;
        self.screen = Screen::Play;
    }

    fn reveal(&self) -> GuessReveal {
        GuessReveal {
            guess: self.state.user_guess(),
            actual: self.state.actual_rate(),
            miss: self.state.guess_miss(),
        }
    }

    /// In-play HUD data.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the play screen.
    pub fn play_view(&self) -> Result<PlayView, FlowError> {
        self.expect_screen(Screen::Play)?;
        Ok(PlayView {
            streak: self.state.streak(),
            total_tries: self.state.total_tries(),
        })
    }

    /// Result screen data. The hidden rate stays out of the view until
    /// `confirm_guess` has run.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::WrongScreen` off the result screen.
    pub fn result_view(&self) -> Result<ResultView, FlowError> {
        self.expect_screen(Screen::Result)?;

        let detail = match self.state.mode() {
            GameMode::Experience => ResultDetail::Experience {
                configured: self.state.configured_rate(),
            },
            GameMode::Guess => ResultDetail::Guess {
                guess: self.state.user_guess(),
                reveal: self.guess_revealed.then(|| self.reveal()),
            },
            GameMode::None => return Err(FlowError::ModeNotSelected),
        };

        Ok(ResultView {
            success: self.state.last_result().unwrap_or(false),
            mode: self.state.mode(),
            streak: self.last_summary.as_ref().map_or(0, RunSummary::streak),
            total_tries: self.state.total_tries(),
            total_successes: self.state.total_successes(),
            success_percent: self.state.observed_success_percent(),
            detail,
        })
    }
}
