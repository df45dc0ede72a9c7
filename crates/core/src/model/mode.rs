use serde::{Deserialize, Serialize};
use std::fmt;

/// Which game the player is in.
///
/// - `None`: pre-game, nothing selected yet
/// - `Experience`: the player sets the continuation rate and feels it
/// - `Guess`: the system draws a hidden rate the player tries to estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    None,
    Experience,
    Guess,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::None => "none",
            GameMode::Experience => "experience",
            GameMode::Guess => "guess",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_pre_game() {
        assert_eq!(GameMode::default(), GameMode::None);
    }

    #[test]
    fn display_names() {
        assert_eq!(GameMode::Experience.to_string(), "experience");
        assert_eq!(GameMode::Guess.to_string(), "guess");
    }
}
