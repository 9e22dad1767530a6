// Night Painter: a tiny freehand raster painter.
// The `canvas` module is the whole painting model; everything else hosts it in a window.

pub mod app;
pub mod canvas;
pub mod cli;
pub mod clipboard;
pub mod draw;
pub mod error;
pub mod gamma;
pub mod history;
pub mod input;
pub mod io;
pub mod logging;
pub mod pen;
pub mod raster;
pub mod settings;
pub mod types;
