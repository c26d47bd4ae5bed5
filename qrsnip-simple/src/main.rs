use std::path::{Path, PathBuf};

use argh::FromArgs;

use qrsnip::io::functional as F;
use qrsnip::scan;

#[derive(FromArgs)]
/// Decode a QR code from an image file using the built-in codecs only.
struct Args {
    /// path to the image to decode
    #[argh(positional)]
    image_path: PathBuf,
}

/// Decode the image and format the single-line report.
///
/// The line carries the first decoded payload, or stays empty after the
/// colon when the image holds no readable code.
fn decode_line(image_path: &Path) -> anyhow::Result<String> {
    let image = F::read_image_any_rgb8(image_path)?;
    let results = scan::decode_rgb(&image)?;

    let data = results
        .first()
        .map(|decoded| decoded.content.as_str())
        .unwrap_or_default();

    Ok(format!("Decoded data: {data}"))
}

fn main() {
    env_logger::init();

    let args: Args = argh::from_env();
    match decode_line(&args.image_path) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
