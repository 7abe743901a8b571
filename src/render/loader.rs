//! Card decoding with a plain-decode fallback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{DynamicImage, ImageReader, ImageResult, RgbaImage, imageops};
use tracing::debug;

use crate::error::Error;

/// Decode `path` to RGBA8.
///
/// The primary attempt sniffs the format from content and applies EXIF
/// orientation. If it fails, the file is decoded again by extension through
/// RGB8, which drops any alpha channel.
///
/// # Errors
/// Returns [`Error::ImageDecodeFailure`] when both attempts fail.
pub fn decode_card(path: &Path) -> Result<RgbaImage, Error> {
    let primary = match decode_oriented(path) {
        Ok(img) => return Ok(img),
        Err(err) => err,
    };
    debug!(path = %path.display(), error = %primary, "primary decode failed; trying plain decode");
    match decode_plain(path) {
        Ok(img) => Ok(img),
        Err(fallback) => Err(Error::ImageDecodeFailure {
            path: path.to_path_buf(),
            primary,
            fallback,
        }),
    }
}

fn decode_oriented(path: &Path) -> ImageResult<RgbaImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let img = img.to_rgba8();
    Ok(apply_orientation(img, read_orientation(path).unwrap_or(1)))
}

fn decode_plain(path: &Path) -> ImageResult<RgbaImage> {
    let rgb = image::open(path)?.to_rgb8();
    Ok(DynamicImage::ImageRgb8(rgb).to_rgba8())
}

fn read_orientation(path: &Path) -> Option<u16> {
    let file = File::open(path).ok()?;
    let mut buf = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut buf).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    let value = u16::try_from(field.value.get_uint(0)?).ok()?;
    debug!(orientation = value, path = %path.display(), "exif orientation");
    Some(value)
}

/// Rotate/flip per the EXIF orientation tag; unknown values pass through.
fn apply_orientation(img: RgbaImage, orientation: u16) -> RgbaImage {
    match orientation {
        2 => imageops::flip_horizontal(&img),
        3 => imageops::rotate180(&img),
        4 => imageops::flip_vertical(&img),
        5 => imageops::flip_horizontal(&imageops::rotate90(&img)),
        6 => imageops::rotate90(&img),
        7 => imageops::flip_horizontal(&imageops::rotate270(&img)),
        8 => imageops::rotate270(&img),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn decodes_png_with_alpha() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("card.png");
        RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 128]))
            .save(&path)
            .unwrap();
        let img = decode_card(&path).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(*img.get_pixel(0, 0), Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn decodes_bmp() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("card.bmp");
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])).save(&path).unwrap();
        let img = decode_card(&path).unwrap();
        assert_eq!(*img.get_pixel(3, 3), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn garbage_reports_both_attempts() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("broken.jpg");
        fs::write(&path, b"definitely not a jpeg").unwrap();
        let err = decode_card(&path).unwrap_err();
        assert!(matches!(err, Error::ImageDecodeFailure { .. }));
    }

    #[test]
    fn missing_file_is_a_decode_failure() {
        let tmp = tempdir().unwrap();
        let err = decode_card(&tmp.path().join("gone.png")).unwrap_err();
        assert!(matches!(err, Error::ImageDecodeFailure { .. }));
    }

    #[test]
    fn orientation_six_rotates_clockwise() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let rotated = apply_orientation(img, 6);
        assert_eq!(rotated.dimensions(), (1, 2));
        assert_eq!(*rotated.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }
}
