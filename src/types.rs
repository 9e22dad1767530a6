// Core types shared by the canvas and the window.

use crate::gamma::GammaLut;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque RGB color. Stored in settings as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB, the layout minifb expects.
    #[inline]
    pub const fn to_pixel(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_pixel(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}', expected #RRGGBB", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let px = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError(s.to_string()))?;
        Ok(Color::from_pixel(px))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// The pixel grid the user paints on.
/// Dimensions are always >= 1 and every pixel is initialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: usize,     // pixels across
    height: usize,    // pixels down
    pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl Surface {
    /// A surface filled with `fill`. Zero dimensions are bumped to 1.
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![fill.to_pixel(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Bytes held by the pixel buffer (what one undo snapshot costs).
    pub fn byte_size(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<u32>()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.get(x, y).map(Color::from_pixel)
    }

    /// Put a pixel if (x,y) is inside bounds; anything outside is dropped.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(px) = self.pixel_mut(x, y) {
            *px = color;
        }
    }

    #[inline]
    pub fn pixel_mut(&mut self, x: i32, y: i32) -> Option<&mut u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&mut self.pixels[y * self.width + x])
    }

    /// New `width`×`height` surface anchored at the top-left corner.
    /// Overlap keeps our pixels; newly exposed area gets `background`; the rest is cropped.
    pub fn resized(&self, width: usize, height: usize, background: Color) -> Surface {
        let mut out = Surface::new(width, height, background);
        let cols = out.width.min(self.width);
        for y in 0..out.height.min(self.height) {
            let src = y * self.width;
            let dst = y * out.width;
            out.pixels[dst..dst + cols].copy_from_slice(&self.pixels[src..src + cols]);
        }
        out
    }

    /// Import a decoded image. Translucent pixels are composited over `background`.
    /// Returns None for an empty (0-wide or 0-high) image.
    pub fn from_rgba_image(img: &RgbaImage, background: Color, lut: &GammaLut) -> Option<Surface> {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return None;
        }
        let bg = background.to_pixel();
        let pixels = img
            .pixels()
            .map(|Rgba([r, g, b, a])| {
                let src = Color::rgb(*r, *g, *b).to_pixel();
                match *a {
                    255 => src,
                    0 => bg,
                    a => lut.mix(bg, src, a as f32 / 255.0),
                }
            })
            .collect();
        Some(Surface {
            width: w as usize,
            height: h as usize,
            pixels,
        })
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = Color::from_pixel(self.pixels[y as usize * self.width + x as usize]);
            Rgb([c.r, c.g, c.b])
        })
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = Color::from_pixel(self.pixels[y as usize * self.width + x as usize]);
            Rgba([c.r, c.g, c.b, 255])
        })
    }
}

/// Per-pixel pen coverage in [0,1] for the stroke in progress; 0 = untouched, 1 = fully painted.
/// Visual: unseen directly; it decides how much pen color shows over the pre-stroke pixels.
pub struct Mask {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>, // length = width * height
}

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            alpha: vec![0.0; width * height],
        }
    }

    /// Raise coverage at (x,y) to `coverage`. Returns the new value if it went up.
    #[inline]
    pub fn raise(&mut self, x: usize, y: usize, coverage: f32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let a = &mut self.alpha[y * self.width + x];
        if coverage <= *a {
            return None;
        }
        *a = coverage.min(1.0);
        Some(*a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_parses_and_prints_hex() {
        let c: Color = "#1a2B3c".parse().unwrap();
        assert_eq!(c, Color::rgb(0x1A, 0x2B, 0x3C));
        assert_eq!(c.to_string(), "#1A2B3C");
        assert_eq!("FFFFFF".parse::<Color>().unwrap(), Color::WHITE);
        assert!("#12345".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
    }

    #[test]
    fn color_pixel_packing() {
        let c = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(c.to_pixel(), 0x0012_3456);
        assert_eq!(Color::from_pixel(0xFF12_3456), c);
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 128)).unwrap();
        assert_eq!(json, "\"#FF0080\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(255, 0, 128));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn new_surface_is_filled_and_never_empty() {
        let s = Surface::new(3, 2, Color::WHITE);
        assert_eq!((s.width(), s.height()), (3, 2));
        assert!(s.pixels().iter().all(|&p| p == 0x00FF_FFFF));

        let tiny = Surface::new(0, 0, Color::BLACK);
        assert_eq!((tiny.width(), tiny.height()), (1, 1));
    }

    #[test]
    fn put_pixel_clips_out_of_bounds() {
        let mut s = Surface::new(4, 4, Color::BLACK);
        s.put_pixel(-1, 0, 0xFF);
        s.put_pixel(0, 4, 0xFF);
        s.put_pixel(100, 100, 0xFF);
        assert!(s.pixels().iter().all(|&p| p == 0));
        s.put_pixel(3, 3, 0xFF);
        assert_eq!(s.get(3, 3), Some(0xFF));
        assert_eq!(s.get(4, 3), None);
    }

    #[test]
    fn resized_grows_with_background_and_crops_when_shrinking() {
        let mut s = Surface::new(2, 2, Color::BLACK);
        s.put_pixel(1, 1, Color::WHITE.to_pixel());

        let red = Color::rgb(255, 0, 0);
        let grown = s.resized(3, 3, red);
        assert_eq!(grown.color_at(1, 1), Some(Color::WHITE));
        assert_eq!(grown.color_at(0, 0), Some(Color::BLACK));
        assert_eq!(grown.color_at(2, 0), Some(red));
        assert_eq!(grown.color_at(0, 2), Some(red));

        let cropped = grown.resized(1, 1, red);
        assert_eq!(cropped.pixels(), &[0]);
    }

    #[test]
    fn rgba_import_composites_alpha_over_background() {
        let lut = GammaLut::new();
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));
        img.put_pixel(2, 0, Rgba([255, 255, 255, 128]));

        let s = Surface::from_rgba_image(&img, Color::BLACK, &lut).unwrap();
        assert_eq!(s.color_at(0, 0), Some(Color::rgb(10, 20, 30)));
        assert_eq!(s.color_at(1, 0), Some(Color::BLACK));
        let half = s.color_at(2, 0).unwrap();
        assert!(half.r > 128 && half.r < 255, "linear-light mix is brighter than 50% sRGB: {half}");

        assert!(Surface::from_rgba_image(&RgbaImage::new(0, 5), Color::BLACK, &lut).is_none());
    }

    #[test]
    fn mask_only_ever_rises() {
        let mut m = Mask::new(2, 2);
        assert_eq!(m.raise(1, 1, 0.4), Some(0.4));
        assert_eq!(m.raise(1, 1, 0.2), None);
        assert_eq!(m.raise(1, 1, 0.4), None);
        assert_eq!(m.raise(1, 1, 3.0), Some(1.0));
        assert_eq!(m.raise(2, 0, 1.0), None);
        assert_eq!(m.alpha, vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn export_matches_surface() {
        let mut s = Surface::new(2, 1, Color::BLACK);
        s.put_pixel(1, 0, Color::rgb(1, 2, 3).to_pixel());
        let rgb = s.to_rgb_image();
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([1, 2, 3]));
        let rgba = s.to_rgba_image();
        assert_eq!(rgba.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }
}
