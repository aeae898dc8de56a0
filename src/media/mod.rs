//! Embedded image handling

pub mod commit;
pub mod normalize;

pub use commit::commit_image;
pub use normalize::{decode, encode_jpeg, flatten, normalize, target_dimensions, Normalized};

use std::path::{Path, PathBuf};

use crate::config::defaults::JPEG_EXTENSION;
use crate::error::PackageError;
use crate::package::archive_name;

/// One image file inside the extracted package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Location on disk, inside the scratch directory
    pub path: PathBuf,
    /// Entry name inside the package, e.g. `word/media/image1.png`
    pub archive_path: String,
    /// Bare file name, as referenced from the markup
    pub file_name: String,
    /// Size in bytes before processing
    pub size: u64,
}

impl ImageEntry {
    pub fn new(root: &Path, path: PathBuf, size: u64) -> Result<Self, PackageError> {
        let archive_path = archive_name(root, &path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            path,
            archive_path,
            file_name,
            size,
        })
    }

    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    /// Where the transcoded image goes: same stem, `.jpg` extension
    pub fn target_path(&self) -> PathBuf {
        self.path.with_extension(JPEG_EXTENSION)
    }

    pub fn target_file_name(&self) -> String {
        self.target_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// True if transcoding changes the file name
    pub fn is_renamed(&self) -> bool {
        self.target_path() != self.path
    }
}

/// Result of a successful transcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    /// File name after processing (`.jpg`)
    pub file_name: String,
    pub compressed_size: u64,
    /// Final pixel dimensions
    pub dimensions: (u32, u32),
    /// Set when the image was scaled down
    pub resized: Option<(u32, u32)>,
    pub renamed: bool,
}
