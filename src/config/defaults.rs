/// Default JPEG quality (1 = smallest, 100 = best)
pub const DEFAULT_QUALITY: u8 = 60;

/// Default ceiling in pixels for the larger image dimension
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;

/// Folder inside the package that holds embedded images
pub const DEFAULT_MEDIA_DIR: &str = "word/media";

/// Markup files that name media files literally
pub const DEFAULT_REFERENCE_FILES: &[&str] = &["word/document.xml", "word/_rels/document.xml.rels"];

/// Raster extensions picked up by the media scan (matched case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff"];

/// Extension given to every transcoded image
pub const JPEG_EXTENSION: &str = "jpg";

/// Suffix appended to the input file stem when no output path is given
pub const OUTPUT_SUFFIX: &str = "_compressed";

/// White canvas used when flattening transparent images
pub const BACKGROUND_COLOR: [u8; 3] = [255, 255, 255];
