//! CPU-side card placement: resample to fit, then composite centered.

use anyhow::{Context, Result};
use fast_image_resize as fir;
use image::{RgbaImage, imageops};

use crate::processing::layout::{center_offset, fit_within};

/// Resample `source` to the largest aspect-preserving size within `max_w` x `max_h`.
pub fn scale_to_fit(source: &RgbaImage, max_w: u32, max_h: u32) -> Result<RgbaImage> {
    let (target_w, target_h) = fit_within(source.width(), source.height(), max_w, max_h);
    if (target_w, target_h) == source.dimensions() {
        return Ok(source.clone());
    }

    let src_view = fir::images::ImageRef::new(
        source.width(),
        source.height(),
        source.as_raw(),
        fir::PixelType::U8x4,
    )
    .context("failed to create source view for card resize")?;
    let mut dst_image = fir::images::Image::new(target_w, target_h, fir::PixelType::U8x4);
    let options = fir::ResizeOptions::new()
        .resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::CatmullRom));
    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src_view, &mut dst_image, Some(&options))
        .context("card resize failed")?;
    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .context("failed to construct resized RGBA image")
}

/// Alpha-composite `image` onto the middle of `surface`; returns the offset used.
pub fn center_on(surface: &mut RgbaImage, image: &RgbaImage) -> (u32, u32) {
    let (x, y) = center_offset(
        image.width(),
        image.height(),
        surface.width(),
        surface.height(),
    );
    imageops::overlay(surface, image, i64::from(x), i64::from(y));
    (x, y)
}
