//! Package (zip container) handling: extraction, media scan, repackaging

pub mod extract;
pub mod repack;
pub mod scan;

pub use extract::extract_package;
pub use repack::repackage;
pub use scan::scan_media;

use std::path::Path;

use crate::error::PackageError;

/// Archive entry name for `path`: relative to `root`, `/`-separated.
pub fn archive_name(root: &Path, path: &Path) -> Result<String, PackageError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PackageError::OutsideRoot(path.to_path_buf()))?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
