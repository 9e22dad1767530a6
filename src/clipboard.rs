// System clipboard via arboard. arboard wants tightly packed RGBA bytes.

use crate::error::Error;
use crate::types::Surface;
use image::RgbaImage;
use std::borrow::Cow;

/// Put the whole surface on the clipboard as an image.
pub fn copy_surface(surface: &Surface) -> Result<(), Error> {
    let rgba = surface.to_rgba_image();
    let data = arboard::ImageData {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
        bytes: Cow::Borrowed(rgba.as_raw()),
    };
    let mut clip = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    clip.set_image(data).map_err(|e| Error::Clipboard(e.to_string()))
}

/// Image currently on the clipboard, or None when it holds something else.
pub fn paste_image() -> Result<Option<RgbaImage>, Error> {
    let mut clip = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    match clip.get_image() {
        Ok(data) => Ok(RgbaImage::from_raw(
            data.width as u32,
            data.height as u32,
            data.bytes.into_owned(),
        )),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(Error::Clipboard(e.to_string())),
    }
}
