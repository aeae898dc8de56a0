use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::defaults::{DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY, OUTPUT_SUFFIX};

#[derive(Parser, Debug)]
#[command(name = "docx-image-compress")]
#[command(
    author,
    version,
    about = "Compress images in a .docx file to reduce file size"
)]
pub struct Args {
    /// Input .docx file path
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output .docx file path (defaults to input with a _compressed suffix)
    pub output: Option<PathBuf>,

    /// JPEG quality 1-100 (lower = smaller file)
    #[arg(default_value_t = i64::from(DEFAULT_QUALITY), allow_negative_numbers = true)]
    pub quality: i64,

    /// Maximum width/height in pixels
    #[arg(default_value_t = DEFAULT_MAX_DIMENSION, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_dimension: u32,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Get the output path, defaulting to the input with a `_compressed` suffix
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `report.docx` -> `report_compressed.docx`, keeping the directory
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name: OsString = input.file_stem().unwrap_or_default().to_os_string();
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}
