//! Card image discovery.
//!
//! A [`Catalog`] is the fixed, name-sorted list of card images found directly
//! inside the cards directory. It never changes after [`Catalog::load`].

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::Error;

/// Extensions accepted as card images (lowercase, without dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp"];

/// Return `true` if `path` has a supported image extension (case-insensitive).
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.iter().any(|e| *e == ext)
        })
}

/// Sorted, dotted list of supported extensions for user-facing messages.
#[must_use]
pub fn supported_extensions_list() -> String {
    let mut exts: Vec<String> = SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect();
    exts.sort();
    exts.join(", ")
}

#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
    paths: Vec<PathBuf>,
}

impl Catalog {
    /// Scan `dir` (non-recursively) for card images.
    ///
    /// # Errors
    /// Returns [`Error::CatalogNotFound`] if `dir` is missing or not a directory,
    /// [`Error::CatalogEmpty`] if it holds no supported image. Entries that
    /// cannot be read (dangling links, permission errors) are skipped.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::CatalogNotFound(dir.to_path_buf()));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            if is_supported_image(path) {
                paths.push(path.to_path_buf());
            } else {
                debug!(path = %path.display(), "skipping unsupported file");
            }
        }

        if paths.is_empty() {
            return Err(Error::CatalogEmpty {
                dir: dir.to_path_buf(),
                supported: supported_extensions_list(),
            });
        }

        // Name order keeps the pre-shuffle sequence identical across machines.
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        info!(dir = %dir.display(), count = paths.len(), "card catalog loaded");

        Ok(Self {
            dir: dir.to_path_buf(),
            paths,
        })
    }

    /// Directory the catalog was loaded from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of cards. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    /// Borrow all card paths in name order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}
