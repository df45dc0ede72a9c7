//! Shared error types for the services crate.

use thiserror::Error;

use door_core::model::RunSummaryError;

use crate::flow::Screen;

/// Errors emitted by `GameFlow` and `DoorSequencer`.
///
/// All of these are caller mistakes or transient refusals; the state machine
/// stays consistent and is always re-derivable from a clean
/// `start`/mode-selection sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    #[error("expected the {expected} screen, currently on {actual}")]
    WrongScreen { expected: Screen, actual: Screen },

    #[error("no game mode selected")]
    ModeNotSelected,

    #[error("guessing is only available in guess mode")]
    NotGuessMode,

    #[error("the hidden rate has already been revealed")]
    AlreadyRevealed,

    #[error("door playback is still in progress")]
    DoorBusy,

    #[error(transparent)]
    Summary(#[from] RunSummaryError),
}
