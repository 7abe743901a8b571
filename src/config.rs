use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use image::Rgba;
use palette::Srgb;
use serde::Deserialize;

pub const DEFAULT_TITLE: &str = "Lotería Display";
pub const MAX_FRAME_RATE: u32 = 240;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct WindowConfig {
    /// Windowed-mode inner width in logical pixels.
    pub width: u32,
    /// Windowed-mode inner height in logical pixels.
    pub height: u32,
    pub title: String,
    /// Open straight into borderless fullscreen.
    pub start_fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            title: DEFAULT_TITLE.to_string(),
            start_fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Hex colour behind the card, e.g. `#121212`.
    pub background: String,
    /// Hex colour for overlay text.
    pub text: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#121212".to_string(),
            text: "#E6E6E6".to_string(),
        }
    }
}

impl ColorConfig {
    pub fn background_rgba(&self) -> Result<Rgba<u8>> {
        parse_hex_color(&self.background)
            .with_context(|| format!("colors.background {:?} is not a hex colour", self.background))
    }

    pub fn text_rgba(&self) -> Result<Rgba<u8>> {
        parse_hex_color(&self.text)
            .with_context(|| format!("colors.text {:?} is not a hex colour", self.text))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct FontConfig {
    /// Preferred family; missing families fall back to DejaVu Sans, then sans-serif.
    pub family: String,
    /// Pixel height of overlay text.
    pub size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Directory holding the card images. Relative paths resolve against
    /// the executable's directory.
    pub cards_dir: PathBuf,
    pub window: WindowConfig,
    /// Target frames per second for the render loop.
    pub frame_rate: u32,
    /// Margin kept free on every side of the card, in physical pixels.
    pub padding: u32,
    /// Optional deterministic seed for every shuffle in this run.
    pub shuffle_seed: Option<u64>,
    pub colors: ColorConfig,
    pub font: FontConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            cards_dir: PathBuf::from("cards"),
            window: WindowConfig::default(),
            frame_rate: 60,
            padding: 40,
            shuffle_seed: None,
            colors: ColorConfig::default(),
            font: FontConfig::default(),
        }
    }
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.window.width > 0 && self.window.height > 0,
            "window width and height must be greater than zero"
        );
        ensure!(
            (1..=MAX_FRAME_RATE).contains(&self.frame_rate),
            "frame-rate must be between 1 and {MAX_FRAME_RATE}"
        );
        ensure!(
            self.font.size.is_finite() && self.font.size > 0.0,
            "font.size must be positive"
        );
        ensure!(
            !self.cards_dir.as_os_str().is_empty(),
            "cards-dir must not be empty"
        );
        self.colors.background_rgba()?;
        self.colors.text_rgba()?;
        Ok(self)
    }

    /// Time budget of one frame at the configured rate.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }

    /// Absolute cards directory; relative entries are taken from `base`.
    #[must_use]
    pub fn resolve_cards_dir(&self, base: &Path) -> PathBuf {
        if self.cards_dir.is_absolute() {
            self.cards_dir.clone()
        } else {
            base.join(&self.cards_dir)
        }
    }
}

/// Parse `#rrggbb` or `rrggbb` into an opaque colour.
pub fn parse_hex_color(input: &str) -> Option<Rgba<u8>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let rgb = Srgb::<u8>::from_str(trimmed).ok()?;
    Some(Rgba([rgb.red, rgb.green, rgb.blue, 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_parse_with_and_without_hash() {
        assert_eq!(parse_hex_color("#121212"), Some(Rgba([18, 18, 18, 255])));
        assert_eq!(parse_hex_color("e6e6e6"), Some(Rgba([230, 230, 230, 255])));
        assert_eq!(parse_hex_color("  "), None);
        assert_eq!(parse_hex_color("#12"), None);
    }

    #[test]
    fn sixty_fps_interval() {
        let cfg = Configuration::default();
        let ms = cfg.frame_interval().as_secs_f64() * 1000.0;
        assert!((ms - 16.666).abs() < 0.01);
    }

    #[test]
    fn relative_cards_dir_joins_base() {
        let cfg = Configuration::default();
        assert_eq!(
            cfg.resolve_cards_dir(Path::new("/opt/loteria")),
            PathBuf::from("/opt/loteria/cards")
        );
    }
}
