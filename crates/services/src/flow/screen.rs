use std::fmt;

/// The five screens of the simulator, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Title,
    ModeSelect,
    RateSetting,
    Play,
    Result,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Title => "title",
            Screen::ModeSelect => "mode-select",
            Screen::RateSetting => "rate-setting",
            Screen::Play => "play",
            Screen::Result => "result",
        };
        write!(f, "{name}")
    }
}
