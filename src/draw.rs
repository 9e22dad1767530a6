// Window + input polling.
// Visual effects provided here:
// 1) A resizable window that shows the canvas 1:1 from its top-left corner.
// 2) A crosshair mouse cursor over the painting area.
// 3) A title bar carrying the status line (file, pen size, AA, undo depth).

use crate::error::Error;
use crate::pen::Buttons;
use crate::types::Surface;
use minifb::{CursorStyle, Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the canvas.
    /// Visual: a new window appears; nothing is painted until the first `present`.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::UpperLeft, // canvas pixel == window pixel, so mouse coords need no mapping
            ..WindowOptions::default()
        };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        window.set_cursor_style(CursorStyle::Crosshair);
        Ok(Self { window })
    }

    /// Push the canvas pixels to the screen (also pumps window events).
    pub fn present(&mut self, surface: &Surface) -> Result<(), Error> {
        self.window
            .update_with_buffer(surface.pixels(), surface.width(), surface.height())
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Mouse position in canvas pixels. Not clamped: strokes may leave the window and get clipped.
    pub fn mouse_pos(&self) -> Option<(i32, i32)> {
        self.window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| (x.floor() as i32, y.floor() as i32))
    }

    pub fn buttons(&self) -> Buttons {
        Buttons {
            left: self.window.get_mouse_down(MouseButton::Left),
            right: self.window.get_mouse_down(MouseButton::Right),
            middle: self.window.get_mouse_down(MouseButton::Middle),
        }
    }

    pub fn ctrl_down(&self) -> bool {
        self.window.is_key_down(Key::LeftCtrl) || self.window.is_key_down(Key::RightCtrl)
    }

    pub fn shift_down(&self) -> bool {
        self.window.is_key_down(Key::LeftShift) || self.window.is_key_down(Key::RightShift)
    }

    /// True on the frame a key goes down (no auto-repeat).
    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Current drawable area of the window, in pixels.
    pub fn inner_size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}
