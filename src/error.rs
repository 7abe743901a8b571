use std::path::PathBuf;

use thiserror::Error;

/// Library error type for catalog and card operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The cards directory is missing or is not a directory.
    #[error("cards folder not found: {}", .0.display())]
    CatalogNotFound(PathBuf),

    /// The cards directory exists but holds no supported images.
    #[error("no image files found in {}. Supported: {supported}", dir.display())]
    CatalogEmpty { dir: PathBuf, supported: String },

    /// Both the primary and the fallback decode of a card failed.
    #[error("failed to decode {}: {primary} (fallback: {fallback})", path.display())]
    ImageDecodeFailure {
        path: PathBuf,
        primary: image::ImageError,
        fallback: image::ImageError,
    },
}
