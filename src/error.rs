// One small error type for the host side of the painter.
// Every variant states *where* things went wrong; canvas operations never fail.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Pushing the surface to the window failed
    Image(String),        // Decoding/encoding an image file failed
    Clipboard(String),    // Talking to the system clipboard failed
    Settings(String),     // Reading/writing the settings file failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::Image(s) => write!(f, "Image error: {s}"),
            Error::Clipboard(s) => write!(f, "Clipboard error: {s}"),
            Error::Settings(s) => write!(f, "Settings error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
