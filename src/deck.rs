//! Shuffled draw order over a [`Catalog`].

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::catalog::Catalog;

/// Where a deck sits in its load → draw → reset cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly shuffled, nothing drawn yet.
    Fresh,
    /// Some but not all cards drawn.
    InProgress,
    /// Every card drawn since the last reset.
    Exhausted,
}

/// Remaining/drawn split over catalog indices.
///
/// `remaining.len() + drawn.len() == catalog.len()` holds after every
/// operation, and the two vectors together hold each index exactly once.
#[derive(Debug)]
pub struct Deck {
    catalog: Catalog,
    remaining: Vec<usize>,
    drawn: Vec<usize>,
    rng: StdRng,
}

impl Deck {
    /// Shuffle a new deck using OS entropy.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    /// Shuffle a new deck with a deterministic seed.
    #[must_use]
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(catalog: Catalog, rng: StdRng) -> Self {
        let mut deck = Self {
            remaining: Vec::with_capacity(catalog.len()),
            drawn: Vec::with_capacity(catalog.len()),
            catalog,
            rng,
        };
        deck.refill();
        deck
    }

    /// Start a new game: reshuffle the whole catalog and clear history.
    pub fn reset(&mut self) {
        self.refill();
        info!(total = self.total(), "deck reset");
    }

    /// Reorder only the undrawn cards; history is untouched.
    pub fn shuffle_remaining(&mut self) {
        self.remaining.shuffle(&mut self.rng);
        debug!(remaining = self.remaining.len(), "remaining cards shuffled");
    }

    /// Move the top card onto the drawn stack. No-op once the deck is empty.
    pub fn draw_next(&mut self) -> Option<&Path> {
        let index = self.remaining.pop()?;
        self.drawn.push(index);
        let path = self.catalog.get(index);
        debug!(
            drawn = self.drawn.len(),
            total = self.total(),
            card = ?path,
            "card drawn"
        );
        path
    }

    /// The most recently drawn card, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Path> {
        self.drawn
            .last()
            .and_then(|&index| self.catalog.get(index))
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.drawn.is_empty() {
            Phase::Fresh
        } else if self.is_exhausted() {
            Phase::Exhausted
        } else {
            Phase::InProgress
        }
    }

    #[must_use]
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Drawn cards, oldest first.
    pub fn drawn(&self) -> impl Iterator<Item = &Path> + '_ {
        self.drawn.iter().filter_map(|&i| self.catalog.get(i))
    }

    /// Undrawn cards; the last one is drawn next.
    pub fn remaining(&self) -> impl Iterator<Item = &Path> + '_ {
        self.remaining.iter().filter_map(|&i| self.catalog.get(i))
    }

    fn refill(&mut self) {
        self.drawn.clear();
        self.remaining.clear();
        self.remaining.extend(0..self.catalog.len());
        self.remaining.shuffle(&mut self.rng);
    }
}
