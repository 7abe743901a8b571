//! Owned viewer state: the deck plus the display mode.

use tracing::info;

use crate::catalog::Catalog;
use crate::deck::Deck;
use crate::events::{Command, DisplayMode};
use crate::render::overlay::OverlayText;

/// What the frame loop has to do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    DisplayModeChanged(DisplayMode),
    Quit,
}

#[derive(Debug)]
pub struct Session {
    deck: Deck,
    mode: DisplayMode,
}

impl Session {
    /// Shuffle the catalog and reveal the first card.
    #[must_use]
    pub fn new(catalog: Catalog, seed: Option<u64>, mode: DisplayMode) -> Self {
        let deck = match seed {
            Some(seed) => Deck::with_seed(catalog, seed),
            None => Deck::new(catalog),
        };
        Self::from_deck(deck, mode)
    }

    #[must_use]
    pub fn from_deck(mut deck: Deck, mode: DisplayMode) -> Self {
        deck.draw_next();
        Self { deck, mode }
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::DrawNext => {
                self.deck.draw_next();
                Outcome::Continue
            }
            Command::Reset => {
                self.deck.reset();
                self.deck.draw_next();
                Outcome::Continue
            }
            Command::ShuffleRemaining => {
                self.deck.shuffle_remaining();
                Outcome::Continue
            }
            Command::ToggleFullscreen => {
                self.mode = self.mode.toggled();
                info!(mode = ?self.mode, "display mode toggled");
                Outcome::DisplayModeChanged(self.mode)
            }
            Command::Quit => Outcome::Quit,
        }
    }

    #[must_use]
    pub fn overlay(&self) -> OverlayText {
        OverlayText::for_deck(&self.deck)
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }
}
