//! Tick-driven door playback, decoupled from session state.
//!
//! The trial result is applied to `SessionState` synchronously with the
//! draw; this sequencer only schedules what the front-end shows afterwards:
//! `Idle → Opening → Closing → Idle` on success, `Idle → Failing → Idle` on
//! failure.

use crate::error::FlowError;

/// Visual phase of the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorPhase {
    #[default]
    Idle,
    Opening,
    Closing,
    Failing,
}

/// Milestones emitted while a playback advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    /// The door finished opening; the HUD may refresh the streak.
    Opened,
    /// The door closed again; input may be re-enabled.
    Settled,
    /// The failure animation finished; the result screen may be shown.
    Failed,
}

/// Fixed-duration phase player driven by `tick`.
#[derive(Debug, Clone)]
pub struct DoorSequencer {
    phase: DoorPhase,
    ticks_left: u32,
    open_ticks: u32,
    close_ticks: u32,
    fail_ticks: u32,
}

impl Default for DoorSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl DoorSequencer {
    pub const DEFAULT_OPEN_TICKS: u32 = 3;
    pub const DEFAULT_CLOSE_TICKS: u32 = 2;
    pub const DEFAULT_FAIL_TICKS: u32 = 4;

    #[must_use]
    pub fn new() -> Self {
        Self::with_timings(
            Self::DEFAULT_OPEN_TICKS,
            Self::DEFAULT_CLOSE_TICKS,
            Self::DEFAULT_FAIL_TICKS,
        )
    }

    /// Builds a sequencer with explicit phase durations, each at least one
    /// tick.
    #[must_use]
    pub fn with_timings(open_ticks: u32, close_ticks: u32, fail_ticks: u32) -> Self {
        Self {
            phase: DoorPhase::Idle,
            ticks_left: 0,
            open_ticks: open_ticks.max(1),
            close_ticks: close_ticks.max(1),
            fail_ticks: fail_ticks.max(1),
        }
    }

    #[must_use]
    pub fn phase(&self) -> DoorPhase {
        self.phase
    }

    /// True while a playback is in flight; the front-end keeps input
    /// disabled until the sequencer settles.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase != DoorPhase::Idle
    }

    /// Starts playback for a trial outcome.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::DoorBusy` while a previous playback is in flight.
    pub fn begin(&mut self, success: bool) -> Result<(), FlowError> {
        if self.is_busy() {
            return Err(FlowError::DoorBusy);
        }
        if success {
            self.phase = DoorPhase::Opening;
            self.ticks_left = self.open_ticks;
        } else {
            self.phase = DoorPhase::Failing;
            self.ticks_left = self.fail_ticks;
        }
        Ok(())
    }

    /// Advances one frame, reporting a milestone when a phase completes.
    pub fn tick(&mut self) -> Option<DoorEvent> {
        if self.phase == DoorPhase::Idle {
            return None;
        }
        self.ticks_left = self.ticks_left.saturating_sub(1);
        if self.ticks_left > 0 {
            return None;
        }

        match self.phase {
            DoorPhase::Opening => {
                self.phase = DoorPhase::Closing;
                self.ticks_left = self.close_ticks;
                Some(DoorEvent::Opened)
            }
            DoorPhase::Closing => {
                self.phase = DoorPhase::Idle;
                Some(DoorEvent::Settled)
            }
            DoorPhase::Failing => {
                self.phase = DoorPhase::Idle;
                Some(DoorEvent::Failed)
            }
            DoorPhase::Idle => None,
        }
    }

    /// Aborts any playback and returns to idle.
    pub fn reset(&mut self) {
        self.phase = DoorPhase::Idle;
        self.ticks_left = 0;
    }
}
