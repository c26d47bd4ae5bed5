#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod selection;

use std::path::PathBuf;

use argh::FromArgs;
use eframe::egui;

use qrsnip::io::functional as F;

#[derive(FromArgs)]
/// Decode QR codes from a manually selected region of an image.
///
/// Drag a rectangle over the code in the preview and press "Decode QR".
struct Args {
    /// path to the image to open
    #[argh(positional)]
    image_path: PathBuf,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args: Args = argh::from_env();
    let source = match F::read_image_any_rgb8(&args.image_path) {
        Ok(image) => image,
        Err(e) => {
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("qrsnip")
                .set_description(format!("Error: {e}"))
                .show();
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let title = format!("qrsnip - {}", args.image_path.display());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        "qrsnip-gui",
        options,
        Box::new(move |_cc| Ok(Box::new(app::SnipApp::new(source)))),
    )
}
