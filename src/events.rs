/// Commands the input dispatcher produces for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    DrawNext,
    /// Reshuffle the whole catalog, then draw the first card.
    Reset,
    ShuffleRemaining,
    ToggleFullscreen,
    Quit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    Windowed,
    Fullscreen,
}

impl DisplayMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Windowed => Self::Fullscreen,
            Self::Fullscreen => Self::Windowed,
        }
    }
}
