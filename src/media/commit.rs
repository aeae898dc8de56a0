//! Writing a transcoded image back into the package
//!
//! An image whose name does not change is replaced atomically. A renamed
//! image (`.png` -> `.jpg`) is committed in three steps: write the new file,
//! remove the old file, rewrite the markup references. If a later step fails
//! the earlier ones are undone, so the package on disk is left either fully
//! renamed or exactly as it was. A rename onto a name that is already taken
//! is refused.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::ImageEntry;
use crate::error::ImageError;
use crate::references::ReferenceRewriter;

/// Write `encoded` for `entry`, renaming and rewriting references if the
/// target name differs. `original` is the image's current content, used to
/// restore it on rollback. Returns the path of the committed image.
///
/// A rename never replaces another file: if the target name is already
/// taken (`image1.png` next to `image1.jpg`), the commit fails and nothing
/// on disk changes.
pub fn commit_image(
    root: &Path,
    entry: &ImageEntry,
    encoded: &[u8],
    original: &[u8],
    rewriter: &ReferenceRewriter,
) -> Result<PathBuf, ImageError> {
    let target = entry.target_path();
    if !entry.is_renamed() {
        write_atomic(&target, encoded, true)?;
        return Ok(target);
    }

    if target.exists() {
        return Err(ImageError::TargetExists(target));
    }
    write_atomic(&target, encoded, false)?;

    if let Err(source) = fs::remove_file(&entry.path) {
        remove_target(&target);
        return Err(ImageError::Commit {
            path: entry.path.clone(),
            source,
        });
    }

    let new_name = entry.target_file_name();
    match rewriter.rewrite(root, &entry.file_name, &new_name) {
        Ok(journal) => {
            journal.keep();
            Ok(target)
        }
        Err(e) => {
            log::warn!("Rolling back rename of {}", entry.file_name);
            if let Err(restore) = fs::write(&entry.path, original) {
                log::error!("Failed to restore {}: {}", entry.path.display(), restore);
            }
            remove_target(&target);
            Err(e.into())
        }
    }
}

/// Write `bytes` to `path` through a temporary file in the same folder.
/// With `overwrite` unset, an existing file at `path` is an error.
fn write_atomic(path: &Path, bytes: &[u8], overwrite: bool) -> Result<(), ImageError> {
    let commit_err = |source| ImageError::Commit {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(commit_err)?;
    tmp.write_all(bytes).map_err(commit_err)?;
    let persisted = if overwrite {
        tmp.persist(path)
    } else {
        tmp.persist_noclobber(path)
    };
    persisted.map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            ImageError::TargetExists(path.to_path_buf())
        } else {
            commit_err(e.error)
        }
    })?;
    Ok(())
}

fn remove_target(target: &Path) {
    if let Err(e) = fs::remove_file(target) {
        log::error!("Failed to roll back {}: {}", target.display(), e);
    }
}
