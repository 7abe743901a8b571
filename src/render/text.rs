//! Overlay glyph rendering from a system font, drawn straight into RGBA frames.

use std::path::PathBuf;

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use fontdb::{Database, Family, Query};
use image::{Rgba, RgbaImage};
use tracing::{info, warn};

const FALLBACK_FAMILY: &str = "DejaVu Sans";

/// Single-line text rasterizer drawing straight into an RGBA frame.
pub struct TextRenderer {
    font: FontVec,
    scale: PxScale,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

impl TextRenderer {
    #[must_use]
    pub fn new(font: FontVec, size_px: f32) -> Self {
        Self {
            font,
            scale: PxScale::from(size_px),
        }
    }

    /// Load `family` from the system font database, falling back to
    /// DejaVu Sans and then any sans-serif face.
    #[must_use]
    pub fn from_system(family: &str, size_px: f32) -> Option<Self> {
        let mut db = Database::new();
        initialize_font_database(&mut db);

        let requested = family.trim();
        let mut candidates: Vec<Family<'_>> = Vec::new();
        if !requested.is_empty() {
            candidates.push(Family::Name(requested));
        }
        candidates.push(Family::Name(FALLBACK_FAMILY));
        candidates.push(Family::SansSerif);

        for candidate in &candidates {
            let query = Query {
                families: std::slice::from_ref(candidate),
                ..Default::default()
            };
            let Some(id) = db.query(&query) else {
                continue;
            };
            let loaded = db.with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index)
            });
            match loaded {
                Some(Ok(font)) => {
                    if !matches!(candidate, Family::Name(name) if *name == requested) {
                        warn!(
                            requested = %requested,
                            using = ?candidate,
                            "overlay font missing; using fallback"
                        );
                    }
                    info!(font = ?candidate, size_px, "overlay font loaded");
                    return Some(Self::new(font, size_px));
                }
                Some(Err(err)) => warn!(font = ?candidate, error = %err, "overlay font unreadable"),
                None => {}
            }
        }
        warn!("no usable system font; overlay text disabled");
        None
    }

    /// Pixel width and line height of `text` on one line.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        (width.ceil().max(0.0) as u32, scaled.height().ceil().max(0.0) as u32)
    }

    /// Draw `text` with its top-left corner at `origin`, clipped to the canvas.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, origin: (i32, i32), color: Rgba<u8>) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = origin.1 as f32 + scaled.ascent();
        let mut caret = origin.0 as f32;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
                    return;
                }
                let px = canvas.get_pixel_mut(x as u32, y as u32);
                blend_coverage(px, color, coverage);
            });
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend_coverage(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let alpha = coverage.clamp(0.0, 1.0) * f32::from(color[3]) / 255.0;
    for c in 0..3 {
        let src = f32::from(color[c]);
        let base = f32::from(dst[c]);
        dst[c] = (src * alpha + base * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8;
    }
    let base_a = f32::from(dst[3]) / 255.0;
    dst[3] = ((alpha + base_a * (1.0 - alpha)) * 255.0).round().clamp(0.0, 255.0) as u8;
}

fn initialize_font_database(db: &mut Database) {
    db.load_system_fonts();
    let bundled_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if bundled_path.exists() {
        db.load_fonts_dir(&bundled_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_coverage_replaces_colour() {
        let mut px = Rgba([18, 18, 18, 255]);
        blend_coverage(&mut px, Rgba([230, 230, 230, 255]), 1.0);
        assert_eq!(px, Rgba([230, 230, 230, 255]));
    }

    #[test]
    fn zero_coverage_keeps_background() {
        let mut px = Rgba([18, 18, 18, 255]);
        blend_coverage(&mut px, Rgba([230, 230, 230, 255]), 0.0);
        assert_eq!(px, Rgba([18, 18, 18, 255]));
    }

    #[test]
    fn half_coverage_mixes() {
        let mut px = Rgba([0, 0, 0, 255]);
        blend_coverage(&mut px, Rgba([200, 100, 50, 255]), 0.5);
        assert_eq!(px, Rgba([100, 50, 25, 255]));
    }

    // Depends on the host having at least one font installed.
    #[test]
    fn measured_text_grows_with_length() {
        let Some(text) = TextRenderer::from_system("Arial", 20.0) else {
            return;
        };
        let (short, h) = text.measure("1/3");
        let (long, _) = text.measure("10/30 cards");
        assert!(h > 0);
        assert!(long > short);

        let mut canvas = RgbaImage::from_pixel(80, 40, Rgba([0, 0, 0, 255]));
        text.draw(&mut canvas, "1/3", (2, 2), Rgba([255, 255, 255, 255]));
        assert!(canvas.pixels().any(|p| p[0] > 0));
    }
}
