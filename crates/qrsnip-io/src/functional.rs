use std::path::Path;
use std::sync::LazyLock;

use image::ImageFormat;
use qrsnip_image::{Image, ImageSize};

use crate::error::IoError;

/// Extensions whose decoders come compiled in from the image crate.
const CODEC_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("bmp", ImageFormat::Bmp),
    ("gif", ImageFormat::Gif),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Extensions of the HEIF container family, rejected without the `heif`
/// feature.
#[cfg(not(feature = "heif"))]
const HEIF_FAMILY: &[&str] = &["avif", "heic", "heif"];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut exts: Vec<&'static str> = CODEC_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect();
    // the HEIF family is decoded by this crate, not the image crate
    #[cfg(feature = "heif")]
    exts.extend_from_slice(crate::heif::HEIF_EXTENSIONS);
    exts
});

/// Returns the image file extensions that have a working decoder compiled in.
pub fn supported_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Reads an image from the given file path and returns it as RGB8.
///
/// The method reads from any image format supported by the image crate and
/// normalizes the pixel data to RGB8. HEIF-family files are routed to the
/// native decoder when the `heif` feature is enabled.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB8 image containing the image data.
///
/// # Example
///
/// ```no_run
/// use qrsnip_image::Image;
/// use qrsnip_io::functional as F;
///
/// let image: Image<u8, 3> = F::read_image_any_rgb8("photo.jpg").unwrap();
///
/// assert_eq!(image.num_channels(), 3);
/// ```
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    #[cfg(feature = "heif")]
    if crate::heif::is_heif(&file_path) {
        return crate::heif::read_image_heif(&file_path);
    }

    // without the container decoder compiled in, HEIF-family files are
    // rejected up front instead of confusing the codec stack
    #[cfg(not(feature = "heif"))]
    if file_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| HEIF_FAMILY.iter().any(|h| e.eq_ignore_ascii_case(h)))
    {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::error::IoError;
    use crate::functional::{read_image_any_rgb8, supported_extensions};

    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        img.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    #[test]
    fn read_any_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("test.png");
        create_test_png(&file_path, 32, 16);

        let image = read_image_any_rgb8(&file_path)?;
        assert_eq!(image.size().width, 32);
        assert_eq!(image.size().height, 16);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.get(0, 0, 2), Some(&128));

        Ok(())
    }

    #[test]
    fn read_any_missing_file() {
        let result = read_image_any_rgb8("/nonexistent/image.png");
        assert!(matches!(result, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_any_normalizes_gray_to_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        let img = image::GrayImage::from_fn(8, 8, |_, _| image::Luma([200u8]));
        img.save_with_format(&file_path, image::ImageFormat::Png)
            .unwrap();

        let image = read_image_any_rgb8(&file_path)?;
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.get(3, 3, 0), Some(&200));
        assert_eq!(image.get(3, 3, 1), Some(&200));
        assert_eq!(image.get(3, 3, 2), Some(&200));

        Ok(())
    }

    #[test]
    fn supported_extensions_contains_codecs() {
        let exts = supported_extensions();
        for expected in &["jpg", "jpeg", "png"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }

        #[cfg(feature = "heif")]
        for expected in &["avif", "heic", "heif"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[cfg(not(feature = "heif"))]
    #[test]
    fn read_any_rejects_heif_family() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("photo.heic");
        std::fs::write(&file_path, b"not a real container")?;

        let result = read_image_any_rgb8(&file_path);
        assert!(matches!(result, Err(IoError::InvalidFileExtension(_))));

        Ok(())
    }

    #[cfg(feature = "heif")]
    #[test]
    fn read_any_dispatches_heif() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("test.avif");

        let img = image::RgbImage::from_fn(20, 10, |_, _| image::Rgb([64u8, 128, 192]));
        let file = std::fs::File::create(&file_path)?;
        let writer = std::io::BufWriter::new(file);
        let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(writer, 6, 85);
        image::DynamicImage::ImageRgb8(img)
            .write_with_encoder(encoder)
            .unwrap();

        let image = read_image_any_rgb8(&file_path)?;
        assert_eq!(image.size().width, 20);
        assert_eq!(image.size().height, 10);

        Ok(())
    }
}
