// What you SEE:
// • A window showing the canvas (black by default).
// • Hold Left Mouse: paint with the primary color. Hold Right Mouse: secondary color.
// • Ctrl+Z undoes the last stroke; see app.rs for the other shortcuts.
// • Closing the window saves pen/colors/canvas size for next time.

use clap::Parser;
use night_painter::app::{App, APP_NAME};
use night_painter::canvas::Canvas;
use night_painter::cli::Args;
use night_painter::draw::Drawer;
use night_painter::error::Error;
use night_painter::settings::{self, Overrides, Settings};
use night_painter::{io, logging};

fn main() -> Result<(), Error> {
    let args = Args::parse();
    logging::init(args.verbose);

    /* --- Settings ---
       Saved preferences first, then command-line overrides for this session only. */
    let settings_path = args.settings.clone().unwrap_or_else(settings::default_path);
    let (settings, write_back) = Settings::load_for_session(&settings_path);
    let overrides = Overrides {
        width: args.width.map(|w| w as usize),
        height: args.height.map(|h| h as usize),
        max_undo: args.max_undo,
    };
    let config = settings.session_config(overrides);

    /* --- Canvas ---
       Visual: a blank surface in the background color, or the image passed on the command line. */
    let mut canvas = Canvas::new(config.clone());
    let mut current_file = None;
    if let Some(path) = &args.file {
        match io::load_image(path) {
            Ok(img) => {
                canvas.open_image(&img);
                current_file = Some(path.clone());
            }
            Err(e) => log::error!("{e}"),
        }
    }
    log::info!(
        "canvas {}x{}, pen {}px, undo depth {}",
        canvas.width(),
        canvas.height(),
        canvas.pen_size(),
        config.max_undo
    );

    /* --- Window ---
       Visual: the window opens at the canvas size. */
    let drawer = Drawer::new(APP_NAME, canvas.width(), canvas.height())?;
    let mut app = App::new(drawer, canvas, settings, write_back, current_file);

    /* ------------------------------ Main loop ------------------------------ */
    while app.is_open() {
        app.frame()?;
    }

    app.shutdown();
    Ok(())
}
