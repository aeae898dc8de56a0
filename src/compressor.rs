//! The compression pipeline: extract, transcode each image, repackage

use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::error::{ImageError, PackageError};
use crate::media::{self, ImageEntry, ProcessedImage};
use crate::package::{extract_package, repackage, scan_media};
use crate::references::ReferenceRewriter;
use crate::report::{self, CompressionReport, ImageOutcome, SizeLedger};

/// Name of the extraction folder inside the scratch directory
const EXTRACT_DIR: &str = "docx_contents";

/// Recompresses the images of one package at a time
pub struct DocxCompressor {
    settings: Settings,
    rewriter: ReferenceRewriter,
}

impl DocxCompressor {
    pub fn new(settings: Settings) -> Self {
        let rewriter = ReferenceRewriter::new(settings.reference_files.clone());
        Self { settings, rewriter }
    }

    /// Compress `input` into `output`.
    ///
    /// Work happens in a scratch directory that is removed when this returns,
    /// whether it succeeds or not. Per-image failures are reported and leave
    /// that image unchanged; only package-level I/O errors are returned.
    pub fn compress(&self, input: &Path, output: &Path) -> Result<CompressionReport, PackageError> {
        self.settings.validate()?;

        let scratch = tempfile::Builder::new()
            .prefix("docx-image-compress")
            .tempdir()
            .map_err(|e| PackageError::io(std::env::temp_dir(), e))?;
        let root = scratch.path().join(EXTRACT_DIR);

        println!("Extracting {}...", input.display());
        extract_package(input, &root)?;

        let Some(images) = scan_media(&root, &self.settings)? else {
            println!("No images found in document");
            let size = copy_through(input, output)?;
            return Ok(CompressionReport::copied_through(size));
        };

        let mut ledger = SizeLedger::default();
        let mut outcomes = Vec::with_capacity(images.len());
        for entry in &images {
            let outcome = self.process_image(&root, entry);
            ledger.record(&outcome);
            for line in report::format_outcome(&outcome) {
                println!("{}", line);
            }
            outcomes.push(outcome);
        }

        println!("\n{}", report::format_totals(&ledger));

        println!("\nCreating {}...", output.display());
        let final_size = repackage(&root, output)?;
        println!("{}", report::format_final_size(final_size));

        Ok(CompressionReport {
            images: outcomes,
            ledger,
            final_size,
            copied_through: false,
        })
    }

    /// Transcode one image, absorbing any failure into the outcome
    pub fn process_image(&self, root: &Path, entry: &ImageEntry) -> ImageOutcome {
        let result = self.transcode(root, entry);
        if let Err(e) = &result {
            log::debug!("{} left unchanged: {:?}", entry.archive_path, e);
        }
        ImageOutcome {
            file_name: entry.file_name.clone(),
            original_size: entry.size,
            result,
        }
    }

    fn transcode(&self, root: &Path, entry: &ImageEntry) -> Result<ProcessedImage, ImageError> {
        let original = fs::read(&entry.path).map_err(ImageError::Read)?;
        let decoded = media::decode(&original, entry.extension())?;
        log::debug!(
            "Decoded {} ({}x{}, {:?})",
            entry.file_name,
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        let normalized = media::normalize(decoded, self.settings.max_dimension);
        if let Some((width, height)) = normalized.resized {
            log::info!(
                "Resizing {} from {}x{} to {}x{}",
                entry.file_name,
                normalized.original_dimensions.0,
                normalized.original_dimensions.1,
                width,
                height
            );
        }

        let encoded = media::encode_jpeg(&normalized.image, self.settings.quality)?;
        media::commit_image(root, entry, &encoded, &original, &self.rewriter)?;

        Ok(ProcessedImage {
            file_name: entry.target_file_name(),
            compressed_size: encoded.len() as u64,
            dimensions: normalized.image.dimensions(),
            resized: normalized.resized,
            renamed: entry.is_renamed(),
        })
    }
}

/// Copy the package unchanged. Returns the output size.
fn copy_through(input: &Path, output: &Path) -> Result<u64, PackageError> {
    if is_same_file(input, output) {
        log::info!("Output is the input, nothing to copy");
    } else {
        fs::copy(input, output).map_err(|e| PackageError::io(output, e))?;
    }
    let size = fs::metadata(output)
        .map_err(|e| PackageError::io(output, e))?
        .len();
    Ok(size)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
