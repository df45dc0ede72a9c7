#![forbid(unsafe_code)]

pub mod error;
pub mod flow;

pub use door_core::Clock;

pub use error::FlowError;
pub use flow::{
    DoorEvent, DoorPhase, DoorSequencer, GameFlow, GuessReveal, PlayView, ResultDetail,
    ResultView, Screen, TrialOutcome,
};
