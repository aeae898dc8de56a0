use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid package archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to walk package contents: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Path {} is not inside the package root", .0.display())]
    OutsideRoot(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PackageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure while processing one image. Never fatal for the run.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to read image: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode JPEG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to write {}: {}", .path.display(), .source)]
    Commit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("target {} already exists", .0.display())]
    TargetExists(PathBuf),

    #[error("failed to update references: {0}")]
    References(#[from] ReferenceError),
}

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("IO error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Max dimension must be positive")]
    ZeroMaxDimension,
}
