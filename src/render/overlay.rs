//! On-screen text: draw counter, key help, and the completion notice.

use image::{Rgba, RgbaImage};

use crate::deck::Deck;
use crate::render::text::TextRenderer;

pub const HELP_TEXT: &str =
    "Space/→/Enter: Next | R: Reset | S: Shuffle | F: Fullscreen | Esc/Q: Quit";
pub const COMPLETE_MESSAGE: &str = "Deck complete. Press R to reset.";

pub const COUNTER_POS: (i32, i32) = (20, 20);
pub const HELP_POS: (i32, i32) = (20, 50);
/// Gap between the completion notice and the bottom edge.
pub const BOTTOM_MARGIN: i32 = 20;

/// The strings shown over one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayText {
    pub counter: String,
    pub help: &'static str,
    pub completion: Option<&'static str>,
}

impl OverlayText {
    #[must_use]
    pub fn for_deck(deck: &Deck) -> Self {
        Self {
            counter: format!("{}/{}", deck.drawn_count(), deck.total()),
            help: HELP_TEXT,
            completion: deck.is_exhausted().then_some(COMPLETE_MESSAGE),
        }
    }
}

/// Top-left corner for a `text_w` x `text_h` label centered horizontally
/// and resting `BOTTOM_MARGIN` above the bottom edge.
#[allow(clippy::cast_possible_truncation)]
pub fn bottom_center_origin(
    surface_w: u32,
    surface_h: u32,
    text_w: u32,
    text_h: u32,
) -> (i32, i32) {
    let x = (i64::from(surface_w) - i64::from(text_w)).div_euclid(2);
    let y = i64::from(surface_h) - i64::from(text_h) - i64::from(BOTTOM_MARGIN);
    (x as i32, y as i32)
}

/// Draw every overlay line onto `frame`.
pub fn draw_overlay(
    frame: &mut RgbaImage,
    text: &TextRenderer,
    overlay: &OverlayText,
    color: Rgba<u8>,
) {
    text.draw(frame, &overlay.counter, COUNTER_POS, color);
    text.draw(frame, overlay.help, HELP_POS, color);
    if let Some(message) = overlay.completion {
        let (w, h) = text.measure(message);
        let origin = bottom_center_origin(frame.width(), frame.height(), w, h);
        text.draw(frame, message, origin, color);
    }
}
