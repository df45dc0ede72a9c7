mod door;
mod screen;
mod service;
mod view;

// Public API of the game flow subsystem.
pub use crate::error::FlowError;
pub use door::{DoorEvent, DoorPhase, DoorSequencer};
pub use screen::Screen;
pub use service::{GameFlow, TrialOutcome};
pub use view::{GuessReveal, PlayView, ResultDetail, ResultView};
