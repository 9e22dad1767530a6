// Command-line arguments. Anything given here overrides the settings file for this session.

use clap::Parser;
use std::path::PathBuf;

/// Night Painter: freehand painting with primary/secondary colors and undo.
#[derive(Parser, Debug)]
#[command(name = "night-painter", version, about)]
pub struct Args {
    /// Image to open on start (png, jpg, bmp).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Settings file to read at start and write on exit.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Undo depth (snapshots kept in memory).
    #[arg(long, value_name = "N")]
    pub max_undo: Option<usize>,

    /// Debug-level logging (RUST_LOG still wins when set).
    #[arg(short, long)]
    pub verbose: bool,
}
