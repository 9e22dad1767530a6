// Host glue: routes window input to the canvas and owns everything the canvas doesn't
// (file association, dialogs, clipboard, settings write-back).
//
// Shortcuts:
//   Ctrl+Z undo            Ctrl+S save            Ctrl+Shift+S save as
//   Ctrl+O open           Ctrl+N new canvas       Ctrl+R resize canvas to window
//   Ctrl+C copy           Ctrl+V paste
//   Ctrl+Left/Right canvas width -/+ 32px   Ctrl+Up/Down canvas height -/+ 32px
//   [ / ] pen size -/+     A antialiasing          X swap colors
//   1..8 primary from palette (Shift: secondary)   B background := secondary

use crate::canvas::Canvas;
use crate::clipboard;
use crate::draw::Drawer;
use crate::error::Error;
use crate::input::{PointerEvent, PointerSampler};
use crate::io::{self, IMAGE_EXTENSIONS};
use crate::settings::Settings;
use crate::types::Color;
use minifb::Key;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "Night Painter";

const RESIZE_STEP: isize = 32;
const RESIZE_KEYS: [(Key, (isize, isize)); 4] = [
    (Key::Left, (-RESIZE_STEP, 0)),
    (Key::Right, (RESIZE_STEP, 0)),
    (Key::Up, (0, -RESIZE_STEP)),
    (Key::Down, (0, RESIZE_STEP)),
];

const PALETTE: [(Key, Color); 8] = [
    (Key::Key1, Color::WHITE),
    (Key::Key2, Color::BLACK),
    (Key::Key3, Color::rgb(0xE5, 0x39, 0x35)), // red
    (Key::Key4, Color::rgb(0xFB, 0x8C, 0x00)), // orange
    (Key::Key5, Color::rgb(0xFD, 0xD8, 0x35)), // yellow
    (Key::Key6, Color::rgb(0x43, 0xA0, 0x47)), // green
    (Key::Key7, Color::rgb(0x1E, 0x88, 0xE5)), // blue
    (Key::Key8, Color::rgb(0x8E, 0x24, 0xAA)), // purple
];

pub struct App {
    drawer: Drawer,
    canvas: Canvas,
    settings: Settings,
    settings_path: Option<PathBuf>, // None: leave the settings file alone
    sampler: PointerSampler,
    current_file: Option<PathBuf>, // where Ctrl+S writes without asking
    title: String,
}

impl App {
    pub fn new(
        drawer: Drawer,
        canvas: Canvas,
        settings: Settings,
        settings_path: Option<PathBuf>,
        current_file: Option<PathBuf>,
    ) -> Self {
        Self {
            drawer,
            canvas,
            settings,
            settings_path,
            sampler: PointerSampler::new(),
            current_file,
            title: String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.drawer.is_open()
    }

    /// One pass of the frame loop: input, then present.
    pub fn frame(&mut self) -> Result<(), Error> {
        self.handle_shortcuts();
        self.handle_pointer();
        self.refresh_title();
        self.drawer.present(self.canvas.surface())
    }

    /// Write the canvas state back to the settings file.
    pub fn shutdown(mut self) {
        match self.settings.persist(&self.canvas, self.settings_path.as_deref()) {
            Ok(true) => log::info!("settings saved"),
            Ok(false) => log::info!("settings not written back"),
            Err(e) => log::error!("{e}"),
        }
    }

    fn handle_pointer(&mut self) {
        let event = self.sampler.sample(self.drawer.mouse_pos(), self.drawer.buttons());
        match event {
            Some(PointerEvent::Down { x, y, buttons }) => self.canvas.pointer_down(x, y, buttons),
            Some(PointerEvent::Move { x, y, buttons }) => self.canvas.pointer_move(x, y, buttons),
            Some(PointerEvent::Up) => self.canvas.pointer_up(),
            None => {}
        }
    }

    fn handle_shortcuts(&mut self) {
        let shift = self.drawer.shift_down();

        if self.drawer.ctrl_down() {
            if self.drawer.pressed_once(Key::Z) {
                self.canvas.undo();
            } else if self.drawer.pressed_once(Key::S) {
                if shift { self.save_as() } else { self.save() }
            } else if self.drawer.pressed_once(Key::O) {
                self.open();
            } else if self.drawer.pressed_once(Key::N) {
                self.new_canvas();
            } else if self.drawer.pressed_once(Key::C) {
                self.copy();
            } else if self.drawer.pressed_once(Key::V) {
                self.paste();
            } else if self.drawer.pressed_once(Key::R) {
                self.resize_to_window();
            } else if let Some((_, step)) = RESIZE_KEYS.iter().find(|(key, _)| self.drawer.pressed_once(*key)) {
                let (w, h) = stepped_size((self.canvas.width(), self.canvas.height()), *step);
                self.canvas.resize(w, h);
            }
            return;
        }

        if self.drawer.pressed_once(Key::LeftBracket) {
            self.canvas.set_pen_size(self.canvas.pen_size().saturating_sub(1).max(1));
        }
        if self.drawer.pressed_once(Key::RightBracket) {
            self.canvas.set_pen_size(self.canvas.pen_size() + 1);
        }
        if self.drawer.pressed_once(Key::A) {
            self.canvas.set_antialiasing(!self.canvas.antialiasing());
        }
        if self.drawer.pressed_once(Key::X) {
            let (p, s) = (self.canvas.primary_color(), self.canvas.secondary_color());
            self.canvas.set_primary_color(s);
            self.canvas.set_secondary_color(p);
        }
        if self.drawer.pressed_once(Key::B) {
            let bg = self.canvas.secondary_color();
            self.canvas.set_background_color(bg);
            log::info!("background color set to {bg}");
        }
        for (key, color) in PALETTE {
            if self.drawer.pressed_once(key) {
                if shift {
                    self.canvas.set_secondary_color(color);
                } else {
                    self.canvas.set_primary_color(color);
                }
            }
        }
    }

    /* ---------- file / clipboard actions ---------- */

    fn save(&mut self) {
        match self.current_file.clone() {
            Some(path) => self.write_to(&path),
            None => self.save_as(),
        }
    }

    fn save_as(&mut self) {
        let Some(mut path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .set_file_name("untitled.png")
            .save_file()
        else {
            return; // dialog cancelled
        };
        if path.extension().is_none() {
            path.set_extension("png");
        }
        self.write_to(&path);
    }

    fn write_to(&mut self, path: &Path) {
        match io::save_surface(self.canvas.surface(), path) {
            Ok(()) => self.current_file = Some(path.to_path_buf()),
            Err(e) => log::error!("{e}"),
        }
    }

    fn open(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        match io::load_image(&path) {
            Ok(img) => {
                self.canvas.open_image(&img);
                self.current_file = Some(path);
            }
            Err(e) => log::error!("{e}"),
        }
    }

    fn new_canvas(&mut self) {
        self.canvas.reset(None);
        self.current_file = None;
    }

    fn copy(&mut self) {
        match clipboard::copy_surface(self.canvas.surface()) {
            Ok(()) => log::info!("canvas copied to clipboard"),
            Err(e) => log::warn!("{e}"),
        }
    }

    fn paste(&mut self) {
        match clipboard::paste_image() {
            Ok(Some(img)) => self.canvas.open_image(&img),
            Ok(None) => log::info!("clipboard holds no image"),
            Err(e) => log::warn!("{e}"),
        }
    }

    fn resize_to_window(&mut self) {
        let (w, h) = self.drawer.inner_size();
        if (w, h) != (self.canvas.width(), self.canvas.height()) {
            self.canvas.resize(w, h);
        }
    }

    fn refresh_title(&mut self) {
        let title = status_title(&self.canvas, self.current_file.as_deref());
        if title != self.title {
            self.drawer.set_title(&title);
            self.title = title;
        }
    }
}

/// Canvas size after one resize step; never below 1x1.
fn stepped_size((width, height): (usize, usize), (dw, dh): (isize, isize)) -> (usize, usize) {
    (
        width.saturating_add_signed(dw).max(1),
        height.saturating_add_signed(dh).max(1),
    )
}

/// "Night Painter - sketch.png - 640x480 - 5px AA - undo 3"
fn status_title(canvas: &Canvas, file: Option<&Path>) -> String {
    let name = file
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string());
    let aa = if canvas.antialiasing() { "AA" } else { "aliased" };
    format!(
        "{APP_NAME} - {name} - {}x{} - {}px {aa} - undo {}",
        canvas.width(),
        canvas.height(),
        canvas.pen_size(),
        canvas.undo_depth()
    )
}
