//! Size accounting and the human-readable run report

use crate::error::ImageError;
use crate::media::ProcessedImage;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// What happened to one image
#[derive(Debug)]
pub struct ImageOutcome {
    /// Name before processing
    pub file_name: String,
    pub original_size: u64,
    pub result: Result<ProcessedImage, ImageError>,
}

impl ImageOutcome {
    /// Size counted in the ledger: the new size on success, the untouched
    /// original size on failure
    pub fn compressed_size(&self) -> u64 {
        match &self.result {
            Ok(processed) => processed.compressed_size,
            Err(_) => self.original_size,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Running totals of image bytes before and after processing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeLedger {
    pub original: u64,
    pub compressed: u64,
    pub images: usize,
    pub failures: usize,
}

impl SizeLedger {
    /// Account for one processed image. Call exactly once per image.
    pub fn record(&mut self, outcome: &ImageOutcome) {
        self.original += outcome.original_size;
        self.compressed += outcome.compressed_size();
        self.images += 1;
        if !outcome.is_success() {
            self.failures += 1;
        }
    }

    pub fn saved(&self) -> i64 {
        self.original as i64 - self.compressed as i64
    }
}

/// Summary of a whole run
#[derive(Debug)]
pub struct CompressionReport {
    pub images: Vec<ImageOutcome>,
    pub ledger: SizeLedger,
    /// Size of the written package
    pub final_size: u64,
    /// True when the package had no media folder and was copied unchanged
    pub copied_through: bool,
}

impl CompressionReport {
    pub fn copied_through(final_size: u64) -> Self {
        Self {
            images: Vec::new(),
            ledger: SizeLedger::default(),
            final_size,
            copied_through: true,
        }
    }
}

/// Percentage saved, 0.0 for an empty original
pub fn reduction_percent(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

/// Report lines for one image, in print order
pub fn format_outcome(outcome: &ImageOutcome) -> Vec<String> {
    match &outcome.result {
        Ok(processed) => {
            let mut lines = Vec::new();
            if let Some((width, height)) = processed.resized {
                lines.push(format!(
                    "  Resized {} to ({}, {})",
                    outcome.file_name, width, height
                ));
            }
            lines.push(format!(
                "  {}: {:.1}KB -> {:.1}KB ({:.1}% reduction)",
                outcome.file_name,
                outcome.original_size as f64 / KIB,
                processed.compressed_size as f64 / KIB,
                reduction_percent(outcome.original_size, processed.compressed_size)
            ));
            lines
        }
        Err(e) => vec![format!("  Error processing {}: {}", outcome.file_name, e)],
    }
}

pub fn format_totals(ledger: &SizeLedger) -> String {
    format!(
        "Total: {:.2}MB -> {:.2}MB",
        ledger.original as f64 / MIB,
        ledger.compressed as f64 / MIB
    )
}

pub fn format_final_size(size: u64) -> String {
    format!("Final .docx size: {:.2}MB", size as f64 / MIB)
}
