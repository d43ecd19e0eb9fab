/// Image file loader
///
/// Decodes a user-selected file into an RGB bitmap. Everything the
/// classifier sees starts here, so alpha and palette images are flattened
/// to plain 8-bit RGB.

use image::RgbImage;
use std::path::Path;
use tracing::info;

use crate::error::{ClassifierError, Result};

/// Extensions offered by the file dialog and accepted by the loader
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"];

/// Check whether a path carries one of the accepted image extensions
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Load an image file as an RGB bitmap
pub fn load_bitmap(path: &Path) -> Result<RgbImage> {
    if !is_supported(path) {
        return Err(ClassifierError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    let bitmap = image::open(path)
        .map_err(|source| ClassifierError::FileOpenFailed {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    info!(
        "📷 Opened {} ({}x{})",
        path.display(),
        bitmap.width(),
        bitmap.height()
    );

    Ok(bitmap)
}
