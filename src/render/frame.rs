//! Builds one complete CPU frame: background, current card, overlay text.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::{Rgba, RgbaImage};
use tracing::warn;

use crate::config::Configuration;
use crate::processing::layout::padded_bounds;
use crate::render::loader::decode_card;
use crate::render::overlay::draw_overlay;
use crate::render::surface::{center_on, scale_to_fit};
use crate::render::text::TextRenderer;
use crate::session::Session;

#[derive(Debug)]
pub struct FrameComposer {
    background: Rgba<u8>,
    text_color: Rgba<u8>,
    padding: u32,
    text: Option<TextRenderer>,
    // Last card that failed to render, so a broken file warns once, not every frame.
    failed: Option<PathBuf>,
}

impl FrameComposer {
    #[must_use]
    pub fn new(
        background: Rgba<u8>,
        text_color: Rgba<u8>,
        padding: u32,
        text: Option<TextRenderer>,
    ) -> Self {
        Self {
            background,
            text_color,
            padding,
            text,
            failed: None,
        }
    }

    /// Resolve colours and the overlay font from `cfg`.
    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        let text = TextRenderer::from_system(&cfg.font.family, cfg.font.size);
        Ok(Self::new(
            cfg.colors.background_rgba()?,
            cfg.colors.text_rgba()?,
            cfg.padding,
            text,
        ))
    }

    /// Compose the frame for `session` at `width` x `height`.
    pub fn compose(&mut self, session: &Session, width: u32, height: u32) -> RgbaImage {
        let mut frame = RgbaImage::from_pixel(width.max(1), height.max(1), self.background);

        if let Some(path) = session.deck().current() {
            self.draw_card(&mut frame, path);
        }

        if let Some(text) = self.text.as_ref() {
            draw_overlay(&mut frame, text, &session.overlay(), self.text_color);
        }
        frame
    }

    fn draw_card(&mut self, frame: &mut RgbaImage, path: &Path) {
        let card = match decode_card(path) {
            Ok(card) => card,
            Err(err) => {
                self.note_failure(path, &err);
                return;
            }
        };
        let (max_w, max_h) = padded_bounds(frame.width(), frame.height(), self.padding);
        match scale_to_fit(&card, max_w, max_h) {
            Ok(scaled) => {
                center_on(frame, &scaled);
                if self.failed.as_deref() == Some(path) {
                    self.failed = None;
                }
            }
            Err(err) => self.note_failure(path, &err),
        }
    }

    fn note_failure(&mut self, path: &Path, err: &dyn std::fmt::Display) {
        if self.failed.as_deref() != Some(path) {
            warn!(path = %path.display(), error = %err, "card skipped this frame");
            self.failed = Some(path.to_path_buf());
        }
    }
}
