use std::path::{Path, PathBuf};

use argh::FromArgs;

use qrsnip::io::functional as F;
use qrsnip::scan;

#[derive(FromArgs)]
/// Decode every QR code found in an image file.
///
/// Supports the standard raster formats plus the HEIF family (HEIC, HEIF,
/// AVIF) with AV1-coded payloads.
struct Args {
    /// path to the image to decode
    #[argh(positional)]
    image_path: PathBuf,
}

/// Decode the image and format one output line per decoded payload.
fn decode_report(image_path: &Path) -> anyhow::Result<Vec<String>> {
    let image = F::read_image_any_rgb8(image_path)?;
    log::debug!(
        "loaded {} ({}x{})",
        image_path.display(),
        image.width(),
        image.height()
    );

    let results = scan::decode_rgb(&image)?;

    Ok(results
        .into_iter()
        .map(|decoded| format!("Decoded Data: {}", decoded.content))
        .collect())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let lines = decode_report(&args.image_path)?;
    if lines.is_empty() {
        println!("No QR code found in the image");
        return Ok(());
    }

    for line in lines {
        println!("{line}");
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args: Args = argh::from_env();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    /// Rasterize a QR code and save it as a PNG file.
    fn write_qr_png(path: &Path, content: &str) {
        let code = qrcode::QrCode::new(content.as_bytes()).unwrap();
        let modules = code.width();
        let colors = code.to_colors();

        let (quiet, scale) = (4, 8);
        let dim = (modules + 2 * quiet) * scale;
        let mut data = vec![255u8; dim * dim];
        for my in 0..modules {
            for mx in 0..modules {
                if colors[my * modules + mx] == qrcode::Color::Dark {
                    for py in 0..scale {
                        for px in 0..scale {
                            let x = (quiet + mx) * scale + px;
                            let y = (quiet + my) * scale + py;
                            data[y * dim + x] = 0;
                        }
                    }
                }
            }
        }

        let img = image::GrayImage::from_raw(dim as u32, dim as u32, data).unwrap();
        img.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    #[test]
    fn report_decodes_hello() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let file_path = tmp_dir.path().join("hello.png");
        write_qr_png(&file_path, "HELLO");

        let lines = super::decode_report(&file_path).unwrap();
        assert_eq!(lines, vec!["Decoded Data: HELLO".to_string()]);
    }

    #[test]
    fn report_empty_for_blank_image() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let file_path = tmp_dir.path().join("blank.png");
        let img = image::GrayImage::from_pixel(64, 64, image::Luma([255u8]));
        img.save_with_format(&file_path, image::ImageFormat::Png)
            .unwrap();

        let lines = super::decode_report(&file_path).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn report_missing_file_is_error() {
        let result = super::decode_report(Path::new("/nonexistent/missing.png"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
