//! Media folder discovery

use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::error::PackageError;
use crate::media::ImageEntry;

/// List the raster images in the package's media folder.
///
/// Returns `None` when the package has no media folder at all. Files whose
/// extension is not on the allow-list, and subdirectories, are skipped.
/// Entries come back sorted by file name.
pub fn scan_media(root: &Path, settings: &Settings) -> Result<Option<Vec<ImageEntry>>, PackageError> {
    let media_dir = root.join(&settings.media_dir);
    if !media_dir.is_dir() {
        return Ok(None);
    }

    let mut images = Vec::new();
    let read_dir = fs::read_dir(&media_dir).map_err(|e| PackageError::io(&media_dir, e))?;
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| PackageError::io(&media_dir, e))?;
        let path = dir_entry.path();
        let metadata = dir_entry
            .metadata()
            .map_err(|e| PackageError::io(&path, e))?;
        if !metadata.is_file() {
            continue;
        }

        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| settings.accepts_extension(ext));
        if !accepted {
            log::debug!("Skipping non-image media file {}", path.display());
            continue;
        }

        images.push(ImageEntry::new(root, path, metadata.len())?);
    }

    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    log::info!("Found {} images in {}", images.len(), media_dir.display());

    Ok(Some(images))
}
