//! Writing the scratch directory back out as a package

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::archive_name;
use crate::error::PackageError;

/// Zip every regular file under `root` into `output` with deflate compression.
///
/// Entry names are paths relative to `root`, joined with `/`. Files are
/// visited in file-name order so the same tree always produces the same
/// entry order. Returns the size in bytes of the written package.
pub fn repackage(root: &Path, output: &Path) -> Result<u64, PackageError> {
    let file = File::create(output).map_err(|e| PackageError::io(output, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated);

    let mut count = 0usize;
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = archive_name(root, path)?;
        log::debug!("Adding {}", name);

        zip.start_file(name, options)?;
        let mut source = File::open(path).map_err(|e| PackageError::io(path, e))?;
        io::copy(&mut source, &mut zip).map_err(|e| PackageError::io(output, e))?;
        count += 1;
    }

    let writer = zip.finish()?;
    writer
        .into_inner()
        .map_err(|e| PackageError::io(output, e.into_error()))?
        .sync_all()
        .map_err(|e| PackageError::io(output, e))?;

    log::info!("Wrote {} entries to {}", count, output.display());

    let size = fs::metadata(output)
        .map_err(|e| PackageError::io(output, e))?
        .len();
    Ok(size)
}
