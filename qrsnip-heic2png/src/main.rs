use std::path::{Path, PathBuf};

use argh::FromArgs;

use qrsnip::io::heif;

#[derive(FromArgs)]
/// Convert a HEIF-family image (HEIC, HEIF, AVIF) to PNG.
///
/// The PNG lands next to the input with the extension replaced unless an
/// explicit output path is given.
struct Args {
    /// path to the image to convert
    #[argh(positional)]
    input_path: PathBuf,

    /// where to write the PNG (defaults to the input with a .png extension)
    #[argh(option, short = 'o')]
    output_path: Option<PathBuf>,
}

/// The input path with its extension replaced by `.png`.
fn default_output(input_path: &Path) -> PathBuf {
    input_path.with_extension("png")
}

/// Decode the container and write the pixels out as PNG.
fn convert(input_path: &Path, output_path: &Path) -> anyhow::Result<()> {
    let decoded = heif::read_image_heif(input_path)?;
    log::debug!(
        "decoded {} ({}x{})",
        input_path.display(),
        decoded.width(),
        decoded.height()
    );

    let (width, height) = (decoded.width() as u32, decoded.height() as u32);
    let img = image::RgbImage::from_raw(width, height, decoded.into_vec())
        .ok_or_else(|| anyhow::anyhow!("pixel buffer does not match the image size"))?;
    img.save_with_format(output_path, image::ImageFormat::Png)?;

    Ok(())
}

fn main() {
    env_logger::init();

    let args: Args = argh::from_env();
    let output_path = args
        .output_path
        .unwrap_or_else(|| default_output(&args.input_path));

    match convert(&args.input_path, &output_path) {
        Ok(()) => println!("Conversion successful: {}", output_path.display()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    /// Encode a small AVIF file to convert.
    fn create_test_avif(path: &Path, width: u32, height: u32) {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(writer, 6, 85);
        image::DynamicImage::ImageRgb8(img)
            .write_with_encoder(encoder)
            .unwrap();
    }

    #[test]
    fn convert_writes_matching_png() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let input_path = tmp_dir.path().join("photo.avif");
        create_test_avif(&input_path, 40, 24);

        let output_path = super::default_output(&input_path);
        super::convert(&input_path, &output_path).unwrap();

        let written = image::open(&output_path).unwrap();
        assert_eq!(written.width(), 40);
        assert_eq!(written.height(), 24);
    }

    #[test]
    fn convert_missing_input_is_error() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let output_path = tmp_dir.path().join("out.png");

        let result = super::convert(Path::new("/nonexistent/photo.heic"), &output_path);
        assert!(result.is_err());
        assert!(!output_path.exists());
    }

    #[test]
    fn default_output_replaces_extension() {
        assert_eq!(
            super::default_output(Path::new("/pics/photo.heic")),
            Path::new("/pics/photo.png")
        );
        assert_eq!(
            super::default_output(Path::new("shot.avif")),
            Path::new("shot.png")
        );
    }
}
