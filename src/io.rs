// Image files in and out. The canvas only ever sees decoded pixels;
// this is where decoding and encoding happen.

use crate::error::Error;
use crate::types::Surface;
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// Extensions offered by the open/save dialogs.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Decode any image file the `image` crate understands into RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage, Error> {
    let img = image::open(path).map_err(|e| Error::Image(format!("open {}: {e}", path.display())))?;
    Ok(img.to_rgba8())
}

/// Pick the encoder from the file extension (png, jpg/jpeg, bmp).
pub fn format_for(path: &Path) -> Result<ImageFormat, Error> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Ok(ImageFormat::Png),
        "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
        "bmp" => Ok(ImageFormat::Bmp),
        _ => Err(Error::Image(format!(
            "unsupported extension '{ext}' for {} (use png, jpg or bmp)",
            path.display()
        ))),
    }
}

/// Encode the surface to `path`. The surface is opaque, so it goes out as RGB8.
pub fn save_surface(surface: &Surface, path: &Path) -> Result<(), Error> {
    let format = format_for(path)?;
    surface
        .to_rgb_image()
        .save_with_format(path, format)
        .map_err(|e| Error::Image(format!("save {}: {e}", path.display())))?;
    log::info!("saved {}x{} image to {}", surface.width(), surface.height(), path.display());
    Ok(())
}
