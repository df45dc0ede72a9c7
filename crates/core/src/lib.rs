#![forbid(unsafe_code)]

pub mod model;
pub mod rng;
pub mod time;
pub mod trial;

pub use time::Clock;
pub use trial::TrialEngine;
