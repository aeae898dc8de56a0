use std::path::PathBuf;

use crate::cli::Args;
use crate::error::ConfigError;

use super::defaults::*;

/// Runtime settings for one compression run
#[derive(Debug, Clone)]
pub struct Settings {
    /// JPEG quality handed to the encoder. Not range-checked here; the
    /// encoder clamps values outside 1-100.
    pub quality: u8,
    /// Ceiling for the larger of width/height, in pixels
    pub max_dimension: u32,

    /// Media folder, relative to the package root
    pub media_dir: PathBuf,
    /// Markup files rewritten when an image is renamed, relative to the package root
    pub reference_files: Vec<PathBuf>,
    /// Lowercase extensions accepted by the media scan
    pub image_extensions: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_dimension: DEFAULT_MAX_DIMENSION,
            media_dir: PathBuf::from(DEFAULT_MEDIA_DIR),
            reference_files: DEFAULT_REFERENCE_FILES.iter().map(PathBuf::from).collect(),
            image_extensions: IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            quality: saturate_quality(args.quality),
            max_dimension: args.max_dimension,
            ..Self::default()
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Add a markup file to rewrite on renames, keeping the defaults
    pub fn with_reference_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_files.push(path.into());
        self
    }

    /// Check that the numeric limits make sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_dimension == 0 {
            return Err(ConfigError::ZeroMaxDimension);
        }
        Ok(())
    }

    /// True if `extension` is on the image allow-list (case-insensitive)
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let lower = extension.to_ascii_lowercase();
        self.image_extensions.iter().any(|e| *e == lower)
    }
}

/// Squeeze a CLI quality into `u8` without range checks. The encoder clamps
/// the result to 1-100.
fn saturate_quality(quality: i64) -> u8 {
    quality.clamp(0, i64::from(u8::MAX)) as u8
}
