// Software pen rasterizer.
// A point is a disc and a line is a "capsule" (the disc swept from one end to the other),
// which gives round caps and round joins: consecutive segments that share an endpoint
// overlap in a full disc there, so a stroke never shows a gap.
//
// Pixel (x,y) is sampled at its integer coordinates, matching the integer pointer positions.

use crate::gamma::GammaLut;
use crate::types::{Color, Mask, Surface};

// Keeps exact-radius pixels inside the hard-edged pen despite float error.
const EDGE_EPSILON: f32 = 1e-3;

/// Pen footprint used for one draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tip {
    pub radius: f32,     // half the pen width in px
    pub antialias: bool, // soft (coverage-blended) edge vs hard edge
}

impl Tip {
    pub fn new(size: u32, antialias: bool) -> Self {
        Self {
            radius: size as f32 * 0.5,
            antialias,
        }
    }
}

/// Paint one round dot of diameter = pen size centered on (x,y).
/// Visual: a filled circle appears; with antialiasing its rim fades into what's below.
pub fn draw_point(surface: &mut Surface, lut: &GammaLut, tip: Tip, x: i32, y: i32, color: Color) {
    draw_capsule(surface, lut, tip, (x as f32, y as f32), (x as f32, y as f32), color);
}

/// Paint a round-capped segment from (x0,y0) to (x1,y1).
/// Visual: a thick line with rounded ends; chaining calls end-to-start looks like one stroke.
#[allow(clippy::too_many_arguments)]
pub fn draw_line(
    surface: &mut Surface,
    lut: &GammaLut,
    tip: Tip,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    draw_capsule(surface, lut, tip, (x0 as f32, y0 as f32), (x1 as f32, y1 as f32), color);
}

/// Paint one segment of a stroke in progress.
/// Coverage is kept as a per-stroke maximum in `mask` and every touched pixel is recomposed
/// from `base` (the pre-stroke pixels), so a pixel reached by two overlapping segments of the
/// same stroke looks exactly as if it had been reached once.
#[allow(clippy::too_many_arguments)]
pub fn sweep(
    surface: &mut Surface,
    base: &Surface,
    mask: &mut Mask,
    lut: &GammaLut,
    tip: Tip,
    from: (i32, i32),
    to: (i32, i32),
    color: Color,
) {
    let src = color.to_pixel();
    let (w, h) = (surface.width(), surface.height());
    let (a, b) = ((from.0 as f32, from.1 as f32), (to.0 as f32, to.1 as f32));
    for_each_covered(w, h, tip, a, b, |x, y, coverage| {
        let Some(coverage) = mask.raise(x, y, coverage) else { return };
        let Some(below) = base.get(x, y) else { return };
        surface.put_pixel(x as i32, y as i32, lut.mix(below, src, coverage));
    });
}

fn draw_capsule(surface: &mut Surface, lut: &GammaLut, tip: Tip, a: (f32, f32), b: (f32, f32), color: Color) {
    let src = color.to_pixel();
    let (w, h) = (surface.width(), surface.height());
    for_each_covered(w, h, tip, a, b, |x, y, coverage| {
        let (x, y) = (x as i32, y as i32);
        if coverage >= 1.0 {
            surface.put_pixel(x, y, src);
        } else if let Some(px) = surface.pixel_mut(x, y) {
            *px = lut.mix(*px, src, coverage);
        }
    });
}

/// Visit every in-bounds pixel the capsule a-b touches, with its pen coverage in (0,1].
/// Hard-edged tips only ever report 1.
fn for_each_covered(
    width: usize,
    height: usize,
    tip: Tip,
    a: (f32, f32),
    b: (f32, f32),
    mut paint: impl FnMut(usize, usize, f32),
) {
    if tip.radius <= 0.0 {
        return;
    }
    // How far from the segment a pixel can still receive paint.
    let reach = if tip.antialias { tip.radius + 0.5 } else { tip.radius + EDGE_EPSILON };

    // Scan just the bounding box, clipped to the surface.
    let x_lo = ((a.0.min(b.0) - reach).floor() as i64).max(0);
    let y_lo = ((a.1.min(b.1) - reach).floor() as i64).max(0);
    let x_hi = ((a.0.max(b.0) + reach).ceil() as i64).min(width as i64 - 1);
    let y_hi = ((a.1.max(b.1) + reach).ceil() as i64).min(height as i64 - 1);
    if x_lo > x_hi || y_lo > y_hi {
        return; // entirely off-surface
    }

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let d = distance_to_segment((x as f32, y as f32), a, b);
            let coverage = if tip.antialias {
                // 1px-wide ramp centered on the pen rim
                (tip.radius + 0.5 - d).clamp(0.0, 1.0)
            } else if d <= reach {
                1.0
            } else {
                0.0
            };
            if coverage > 0.0 {
                paint(x as usize, y as usize, coverage);
            }
        }
    }
}

fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
