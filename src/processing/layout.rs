/// Largest size with the source aspect ratio that fits inside `max_w` x `max_h`.
///
/// Uses one uniform scale factor; each side is rounded, then clamped to
/// `1..=bound` so a result never collapses to zero or overflows the box.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let iw = src_w.max(1) as f64;
    let ih = src_h.max(1) as f64;
    let bw = max_w.max(1);
    let bh = max_h.max(1);
    let scale = (f64::from(bw) / iw).min(f64::from(bh) / ih);
    let scale = if scale.is_finite() { scale } else { 1.0 };
    let w = (iw * scale).round().clamp(1.0, f64::from(bw));
    let h = (ih * scale).round().clamp(1.0, f64::from(bh));
    (w as u32, h as u32)
}

/// Subtract `padding` from every side of a viewport, keeping at least 1px.
pub fn padded_bounds(width: u32, height: u32, padding: u32) -> (u32, u32) {
    let inset = padding.saturating_mul(2);
    (
        width.saturating_sub(inset).max(1),
        height.saturating_sub(inset).max(1),
    )
}

/// Top-left offset that centers `inner` within `outer` (floor division).
pub fn center_offset(inner_w: u32, inner_h: u32, outer_w: u32, outer_h: u32) -> (u32, u32) {
    let ox = outer_w.saturating_sub(inner_w) / 2;
    let oy = outer_h.saturating_sub(inner_h) / 2;
    (ox, oy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_aspect(src: (u32, u32), out: (u32, u32)) {
        let src_ar = f64::from(src.0) / f64::from(src.1);
        let out_ar = f64::from(out.0) / f64::from(out.1);
        // One pixel of rounding on the shorter side bounds the drift.
        let tolerance = src_ar / f64::from(out.0.min(out.1)) + 1e-9;
        assert!(
            (src_ar - out_ar).abs() <= tolerance,
            "aspect drift: {src:?} -> {out:?}"
        );
    }

    #[test]
    fn shrinks_wide_image_to_width() {
        assert_eq!(fit_within(4000, 2000, 820, 520), (820, 410));
    }

    #[test]
    fn grows_small_image_to_height() {
        assert_eq!(fit_within(100, 200, 820, 520), (260, 520));
    }

    #[test]
    fn square_into_square() {
        assert_eq!(fit_within(640, 640, 300, 300), (300, 300));
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within(10_000, 1, 100, 100), (100, 1));
        assert_eq!(fit_within(1, 10_000, 100, 100), (1, 100));
    }

    #[test]
    fn results_respect_bounds_and_aspect() {
        let sources = [(1200, 1800), (1920, 1080), (333, 777), (5, 3), (4096, 4095)];
        let bounds = [(820, 520), (1, 1), (1840, 1000), (37, 911)];
        for &(sw, sh) in &sources {
            for &(bw, bh) in &bounds {
                let (w, h) = fit_within(sw, sh, bw, bh);
                assert!(w >= 1 && h >= 1);
                assert!(w <= bw && h <= bh, "{sw}x{sh} in {bw}x{bh} gave {w}x{h}");
                if w > 1 && h > 1 {
                    assert_aspect((sw, sh), (w, h));
                }
            }
        }
    }

    #[test]
    fn padding_is_clamped() {
        assert_eq!(padded_bounds(900, 600, 40), (820, 520));
        assert_eq!(padded_bounds(60, 60, 40), (1, 1));
    }

    #[test]
    fn center_uses_floor_division() {
        assert_eq!(center_offset(820, 411, 900, 600), (40, 94));
        assert_eq!(center_offset(901, 10, 900, 600), (0, 295));
    }
}
