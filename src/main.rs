use anyhow::{Context, Result};
use clap::Parser;

use docx_image_compress::cli::Args;
use docx_image_compress::config::Settings;
use docx_image_compress::DocxCompressor;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    let settings = Settings::from_args(&args);
    let output_path = args.output_path();

    println!("Input: {}", args.input.display());
    println!("Output: {}", output_path.display());
    println!("Quality: {}", args.quality);
    println!("Max dimension: {}px\n", settings.max_dimension);

    let report = DocxCompressor::new(settings)
        .compress(&args.input, &output_path)
        .with_context(|| format!("Failed to compress {}", args.input.display()))?;

    if report.ledger.failures > 0 {
        log::warn!(
            "{} of {} images could not be processed and were left unchanged",
            report.ledger.failures,
            report.ledger.images
        );
    }

    println!("\nDone!");

    Ok(())
}
