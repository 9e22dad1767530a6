//! The drawing surface: pixels, pen, pointer gestures and undo history.
//!
//! A gesture runs `IDLE -> STROKING -> IDLE`:
//! * pointer down paints one point,
//! * each pointer move paints a segment from the previous position,
//! * pointer up forgets the previous position.
//!
//! The first paint of a gesture snapshots the surface onto the undo stack, however the
//! gesture started, so one `undo()` reverts a whole click-drag-release.
//!
//! While stroking, paint goes through a [`StrokeLayer`]: per-pixel pen coverage is kept as a
//! maximum over the whole gesture and composited over the pre-stroke pixels, so antialiased
//! segment joints are not blended twice.

use crate::gamma::GammaLut;
use crate::history::{DEFAULT_MAX_UNDO, UndoStack};
use crate::pen::{Buttons, PenState};
use crate::raster::{self, Tip};
use crate::types::{Color, Mask, Surface};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Which background `reset(None)` fills with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetBackground {
    /// The background the canvas was constructed with.
    Initial,
    /// Whatever background is configured right now.
    #[default]
    Current,
}

/// Everything needed to build a canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
    pub background: Color,
    pub max_undo: usize, // snapshots kept; each costs width*height*4 bytes
    pub reset_background: ResetBackground,
    pub pen: PenState,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            background: Color::BLACK,
            max_undo: DEFAULT_MAX_UNDO,
            reset_background: ResetBackground::Current,
            pen: PenState::default(),
        }
    }
}

/// Paint of the gesture in progress, in one color.
struct StrokeLayer {
    base: Surface, // pixels under the stroke
    coverage: Mask,
    color: Color,
}

impl StrokeLayer {
    fn new(under: &Surface, color: Color) -> Self {
        Self {
            base: under.clone(),
            coverage: Mask::new(under.width(), under.height()),
            color,
        }
    }
}

pub struct Canvas {
    surface: Surface,
    pen: PenState,
    background: Color,
    initial_background: Color,
    reset_background: ResetBackground,
    history: UndoStack,
    prev: Option<(i32, i32)>, // gesture tracker: Some while stroking
    stroke: Option<StrokeLayer>,
    stroke_saved: bool, // this gesture already has its undo snapshot
    lut: GammaLut,
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            surface: Surface::new(config.width, config.height, config.background),
            pen: config.pen,
            background: config.background,
            initial_background: config.background,
            reset_background: config.reset_background,
            history: UndoStack::new(config.max_undo),
            prev: None,
            stroke: None,
            stroke_saved: false,
            lut: GammaLut::new(),
        }
    }

    /* ---------- pen & surface accessors ---------- */

    pub fn set_pen_size(&mut self, size: u32) {
        self.pen.size = size;
    }

    pub fn set_primary_color(&mut self, color: Color) {
        self.pen.primary = color;
    }

    pub fn set_secondary_color(&mut self, color: Color) {
        self.pen.secondary = color;
    }

    pub fn set_antialiasing(&mut self, on: bool) {
        self.pen.antialiasing = on;
    }

    /// Background used for newly exposed area on resize and for `reset(None)`.
    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    pub fn pen_size(&self) -> u32 {
        self.pen.size
    }

    pub fn primary_color(&self) -> Color {
        self.pen.primary
    }

    pub fn secondary_color(&self) -> Color {
        self.pen.secondary
    }

    pub fn antialiasing(&self) -> bool {
        self.pen.antialiasing
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    /// Current pixels, for presenting, saving or copying.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Bytes held by undo snapshots.
    pub fn history_bytes(&self) -> usize {
        self.history.byte_size()
    }

    pub fn is_stroking(&self) -> bool {
        self.prev.is_some()
    }

    /* ---------- stroke rendering ---------- */

    fn tip(&self) -> Tip {
        Tip::new(self.pen.size, self.pen.antialiasing)
    }

    /// Paint one pen-sized dot in `color`.
    pub fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        let tip = self.tip();
        raster::draw_point(&mut self.surface, &self.lut, tip, x, y, color);
    }

    /// Paint a round-capped segment in `color`.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let tip = self.tip();
        raster::draw_line(&mut self.surface, &self.lut, tip, x0, y0, x1, y1, color);
    }

    /* ---------- gesture state machine ---------- */

    /// IDLE -> STROKING. Only a lone left or right button starts a stroke.
    pub fn pointer_down(&mut self, x: i32, y: i32, buttons: Buttons) {
        let Some(button) = buttons.resolve() else {
            log::trace!("pointer down ignored for {buttons:?}");
            return;
        };
        self.end_gesture();
        self.prev = Some((x, y));
        self.paint_stroke((x, y), (x, y), self.pen.color_for(button));
    }

    /// STROKING -> STROKING. Draws from the tracked position to (x,y).
    pub fn pointer_move(&mut self, x: i32, y: i32, buttons: Buttons) {
        if buttons.is_empty() {
            return; // hover, nothing held
        }
        let Some((px, py)) = self.prev else {
            // first move of a gesture whose point is already down
            self.prev = Some((x, y));
            return;
        };
        if let Some(button) = buttons.resolve() {
            self.paint_stroke((px, py), (x, y), self.pen.color_for(button));
        }
        self.prev = Some((x, y));
    }

    /// STROKING -> IDLE, whichever button was released.
    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    fn end_gesture(&mut self) {
        self.prev = None;
        self.stroke = None;
        self.stroke_saved = false;
    }

    /// Paint part of the current gesture, snapshotting first if it hasn't painted yet.
    fn paint_stroke(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        if !self.stroke_saved {
            self.snapshot();
            self.stroke_saved = true;
        }
        // a color switch mid-gesture layers over what is already painted
        if self.stroke.as_ref().is_none_or(|layer| layer.color != color) {
            self.stroke = Some(StrokeLayer::new(&self.surface, color));
        }
        let tip = self.tip();
        if let Some(layer) = self.stroke.as_mut() {
            raster::sweep(&mut self.surface, &layer.base, &mut layer.coverage, &self.lut, tip, from, to, color);
        }
    }

    /* ---------- history & surface lifecycle ---------- */

    fn snapshot(&mut self) {
        if self.history.push(self.surface.clone()) {
            log::debug!("undo stack full ({}), dropped oldest snapshot", self.history.capacity());
        }
        log::debug!(
            "undo depth {} ({:.1} MB retained)",
            self.history.len(),
            self.history.byte_size() as f64 / (1024.0 * 1024.0)
        );
    }

    /// Revert to the state before the last stroke/resize/import.
    /// Returns false (and changes nothing) once the history is exhausted.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.surface = previous;
                self.end_gesture();
                true
            }
            None => {
                log::debug!("nothing to undo");
                false
            }
        }
    }

    /// Resize anchored at the top-left. Undoable.
    /// New area gets the background color; shrinking crops.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            log::warn!("resize to {width}x{height} clamped to at least 1x1");
        }
        self.snapshot();
        self.surface = self.surface.resized(width, height, self.background);
        self.end_gesture();
        log::debug!("canvas resized to {}x{}", self.width(), self.height());
    }

    /// Blank the canvas at its current size and drop all history. Not undoable.
    /// An explicit `background` also becomes the current background.
    pub fn reset(&mut self, background: Option<Color>) {
        let fill = match background {
            Some(color) => {
                self.background = color;
                color
            }
            None => match self.reset_background {
                ResetBackground::Initial => self.initial_background,
                ResetBackground::Current => self.background,
            },
        };
        self.surface = Surface::new(self.width(), self.height(), fill);
        self.history.clear();
        self.end_gesture();
        log::debug!("canvas reset to {fill}");
    }

    /// Replace the canvas with an already-decoded image; the canvas takes the image's size.
    /// Undoable. Transparent areas show the background color. Empty images are ignored.
    pub fn open_image(&mut self, image: &RgbaImage) {
        let Some(surface) = Surface::from_rgba_image(image, self.background, &self.lut) else {
            log::warn!("ignoring empty {}x{} image", image.width(), image.height());
            return;
        };
        self.snapshot();
        self.surface = surface;
        self.end_gesture();
        log::debug!("opened {}x{} image", self.width(), self.height());
    }
}
