pub mod cli;
pub mod compressor;
pub mod config;
pub mod error;
pub mod media;
pub mod package;
pub mod references;
pub mod report;

pub use compressor::DocxCompressor;
pub use config::Settings;
pub use error::{ImageError, PackageError, ReferenceError};
pub use report::{CompressionReport, SizeLedger};

use std::path::Path;

/// High-level API for shrinking a .docx file.
///
/// Extracts `input`, re-encodes every raster image in `word/media` as JPEG
/// at `settings.quality`, downscaling anything larger than
/// `settings.max_dimension`, updates the markup references to renamed
/// images, and writes the result to `output`. A package without a media
/// folder is copied unchanged.
///
/// Per-image failures do not fail the call; they are recorded in the
/// returned report and the image is kept as it was.
///
/// # Example
///
/// ```no_run
/// use docx_image_compress::{compress_docx, Settings};
/// use std::path::Path;
///
/// let settings = Settings::default().with_quality(50);
/// let report = compress_docx(
///     Path::new("thesis.docx"),
///     Path::new("thesis_compressed.docx"),
///     &settings,
/// ).unwrap();
///
/// println!("saved {} bytes", report.ledger.saved());
/// ```
pub fn compress_docx(
    input: &Path,
    output: &Path,
    settings: &Settings,
) -> Result<CompressionReport, PackageError> {
    DocxCompressor::new(settings.clone()).compress(input, output)
}
