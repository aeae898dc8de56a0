//! Package extraction into a scratch directory

use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use crate::error::PackageError;

/// Extract every entry of the zip at `input` into `dest`, preserving the
/// archive's internal hierarchy.
pub fn extract_package(input: &Path, dest: &Path) -> Result<(), PackageError> {
    let file = File::open(input).map_err(|e| PackageError::io(input, e))?;
    let mut archive = ZipArchive::new(file)?;

    log::info!(
        "Extracting {} entries from {}",
        archive.len(),
        input.display()
    );
    archive.extract(dest)?;

    Ok(())
}
