// Persisted preferences: canvas size, colors, pen, antialiasing, undo depth.
// Stored as pretty JSON; every field has a default so older/partial files still load.

use crate::canvas::{Canvas, CanvasConfig, ResetBackground};
use crate::error::Error;
use crate::history::DEFAULT_MAX_UNDO;
use crate::pen::PenState;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";
const APP_DIR_NAME: &str = "night-painter";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_canvas_width")]
    pub canvas_width: usize,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: usize,
    #[serde(default = "default_primary_color")]
    pub primary_color: Color,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: Color,
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default = "default_pen_size")]
    pub pen_size: u32,
    #[serde(default = "default_antialiasing")]
    pub antialiasing: bool,
    #[serde(default = "default_max_undo")]
    pub max_undo: usize,
    #[serde(default)]
    pub reset_background: ResetBackground,
}

fn default_canvas_width() -> usize {
    1280
}

fn default_canvas_height() -> usize {
    720
}

fn default_primary_color() -> Color {
    Color::WHITE
}

fn default_secondary_color() -> Color {
    Color::BLACK
}

fn default_background_color() -> Color {
    Color::BLACK
}

fn default_pen_size() -> u32 {
    5
}

fn default_antialiasing() -> bool {
    true
}

fn default_max_undo() -> usize {
    DEFAULT_MAX_UNDO
}

/// Command-line values for this run only. They shape the canvas but are never saved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub max_undo: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            background_color: default_background_color(),
            pen_size: default_pen_size(),
            antialiasing: default_antialiasing(),
            max_undo: default_max_undo(),
            reset_background: ResetBackground::default(),
        }
    }
}

/// `<config dir>/night-painter/settings.json`, or next to the working directory
/// when the platform has no config dir.
pub fn default_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SETTINGS_FILE_NAME)
}

impl Settings {
    /// Missing or blank file gives defaults; malformed JSON is an error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            log::debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Settings(format!("read {}: {e}", path.display())))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut settings: Settings = serde_json::from_str(&content)
            .map_err(|e| Error::Settings(format!("parse {}: {e}", path.display())))?;
        settings.sanitize();
        Ok(settings)
    }

    /// Startup load. Returns the settings and the path exit may write back to.
    /// A malformed file yields defaults and no write-back path, so it survives for the user to fix.
    pub fn load_for_session(path: &Path) -> (Self, Option<PathBuf>) {
        match Self::load(path) {
            Ok(settings) => (settings, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("{e}; using defaults and leaving the file untouched");
                (Self::default(), None)
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Settings(format!("create {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Settings(format!("serialize: {e}")))?;
        std::fs::write(path, json)
            .map_err(|e| Error::Settings(format!("write {}: {e}", path.display())))
    }

    /// The canvas does not validate sizes, so reject non-positive values here.
    pub fn sanitize(&mut self) {
        if self.pen_size == 0 {
            log::warn!("pen_size 0 in settings, using 1");
            self.pen_size = 1;
        }
        self.canvas_width = self.canvas_width.max(1);
        self.canvas_height = self.canvas_height.max(1);
    }

    /// Canvas config for this run: saved preferences with `overrides` on top.
    pub fn session_config(&self, overrides: Overrides) -> CanvasConfig {
        let mut config = self.canvas_config();
        if let Some(w) = overrides.width {
            config.width = w.max(1);
        }
        if let Some(h) = overrides.height {
            config.height = h.max(1);
        }
        if let Some(n) = overrides.max_undo {
            config.max_undo = n;
        }
        config
    }

    pub fn canvas_config(&self) -> CanvasConfig {
        CanvasConfig {
            width: self.canvas_width,
            height: self.canvas_height,
            background: self.background_color,
            max_undo: self.max_undo,
            reset_background: self.reset_background,
            pen: PenState {
                size: self.pen_size,
                antialiasing: self.antialiasing,
                primary: self.primary_color,
                secondary: self.secondary_color,
            },
        }
    }

    /// Copy the canvas' current state back, ready to save on exit.
    pub fn capture(&mut self, canvas: &Canvas) {
        self.canvas_width = canvas.width();
        self.canvas_height = canvas.height();
        self.primary_color = canvas.primary_color();
        self.secondary_color = canvas.secondary_color();
        self.background_color = canvas.background_color();
        self.pen_size = canvas.pen_size();
        self.antialiasing = canvas.antialiasing();
    }

    /// Exit-time write-back. With no `path` nothing is written; returns whether a file was saved.
    pub fn persist(&mut self, canvas: &Canvas, path: Option<&Path>) -> Result<bool, Error> {
        let Some(path) = path else {
            return Ok(false);
        };
        self.capture(canvas);
        self.save(path)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loaded = Settings::load(&dir.path().join(SETTINGS_FILE_NAME)).expect("load");
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);

        let settings = Settings {
            canvas_width: 640,
            primary_color: Color::rgb(10, 20, 30),
            antialiasing: false,
            reset_background: ResetBackground::Initial,
            ..Settings::default()
        };
        settings.save(&path).expect("save");
        assert_eq!(Settings::load(&path).expect("load"), settings);
    }

    #[test]
    fn partial_file_fills_defaults_and_sanitizes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, r##"{ "pen_size": 0, "background_color": "#102030" }"##).unwrap();

        let loaded = Settings::load(&path).expect("load");
        assert_eq!(loaded.pen_size, 1);
        assert_eq!(loaded.background_color, Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(loaded.canvas_width, 1280);
        assert_eq!(loaded.max_undo, DEFAULT_MAX_UNDO);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(Error::Settings(_))));

        std::fs::write(&path, r#"{ "primary_color": "white" }"#).unwrap();
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn malformed_file_survives_the_session() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let broken = r#"{ "pen_size": 9, "canvas_width": "#;
        std::fs::write(&path, broken).unwrap();

        let (mut settings, write_back) = Settings::load_for_session(&path);
        assert_eq!(settings, Settings::default());
        assert_eq!(write_back, None);

        let canvas = Canvas::new(settings.canvas_config());
        assert!(!settings.persist(&canvas, write_back.as_deref()).expect("persist"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn command_line_undo_depth_is_not_saved() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        Settings { max_undo: 40, ..Settings::default() }.save(&path).expect("save");

        let (mut settings, write_back) = Settings::load_for_session(&path);
        assert_eq!(write_back.as_deref(), Some(path.as_path()));
        let overrides = Overrides { max_undo: Some(3), width: Some(64), ..Overrides::default() };
        let config = settings.session_config(overrides);
        assert_eq!((config.max_undo, config.width, config.height), (3, 64, 720));

        let canvas = Canvas::new(config);
        assert!(settings.persist(&canvas, write_back.as_deref()).expect("persist"));
        let saved = Settings::load(&path).expect("load");
        assert_eq!(saved.max_undo, 40);
        // the canvas size at exit is a preference like any other
        assert_eq!(saved.canvas_width, 64);
    }

    #[test]
    fn colors_are_written_as_hex() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains(r##""primary_color":"#FFFFFF""##), "{json}");
        assert!(json.contains(r#""reset_background":"current""#), "{json}");
    }

    #[test]
    fn capture_reads_back_canvas_state() {
        let mut settings = Settings::default();
        let mut canvas = Canvas::new(settings.canvas_config());
        canvas.set_pen_size(12);
        canvas.set_primary_color(Color::rgb(200, 0, 0));
        canvas.set_background_color(Color::rgb(5, 5, 5));
        canvas.set_antialiasing(false);
        canvas.resize(300, 200);

        settings.capture(&canvas);
        assert_eq!(settings.pen_size, 12);
        assert_eq!(settings.primary_color, Color::rgb(200, 0, 0));
        assert_eq!(settings.background_color, Color::rgb(5, 5, 5));
        assert!(!settings.antialiasing);
        assert_eq!((settings.canvas_width, settings.canvas_height), (300, 200));
    }
}
