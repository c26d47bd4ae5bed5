#![deny(missing_docs)]
//! QR code decoding for qrsnip.
//!
//! This crate decodes QR codes from image buffers. It uses the `rqrr` crate
//! for the actual QR detection and decoding and the qrsnip image operations
//! for the grayscale and binarization preprocessing.

use rqrr::PreparedImage;
use thiserror::Error;

use qrsnip_image::{Image, ImageError};
use qrsnip_imgproc::color::gray_from_rgb_u8;
use qrsnip_imgproc::threshold::threshold_binary;

/// Cutoff used for the binarization retry when a grayscale decode is empty.
const BINARY_CUTOFF: u8 = 128;

/// Error type for QR decoding operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Error in a preprocessing image operation.
    #[error("Image processing error: {0}")]
    ImageOperation(#[from] ImageError),
}

/// The symbology of a decoded code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbology {
    /// A QR code.
    QrCode,
}

impl std::fmt::Display for Symbology {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Symbology::QrCode => write!(f, "QRCODE"),
        }
    }
}

/// A decoded payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The symbology the payload was decoded from.
    pub symbology: Symbology,
    /// The decoded text content.
    pub content: String,
}

/// Decode all QR codes found in a grayscale image.
///
/// Grids that are detected but fail to decode are skipped, so a partially
/// damaged image still yields the codes that could be read.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
///
/// # Returns
///
/// The decoded payloads, empty when no code was found.
pub fn decode_gray(src: &Image<u8, 1>) -> Result<Vec<Decoded>, ScanError> {
    // a zero-area image cannot contain a code
    if src.cols() == 0 || src.rows() == 0 {
        return Ok(Vec::new());
    }

    let cols = src.cols();
    let data = src.as_slice();
    let mut prepared =
        PreparedImage::prepare_from_greyscale(cols, src.rows(), |x, y| data[y * cols + x]);

    let mut results = Vec::new();
    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_meta, content)) => results.push(Decoded {
                symbology: Symbology::QrCode,
                content,
            }),
            Err(e) => {
                log::debug!("skipping grid that failed to decode: {e}");
            }
        }
    }

    Ok(results)
}

/// Decode all QR codes found in an RGB8 image.
///
/// The image is converted to grayscale before decoding.
pub fn decode_rgb(src: &Image<u8, 3>) -> Result<Vec<Decoded>, ScanError> {
    let mut gray = Image::from_size_val(src.size(), 0)?;
    gray_from_rgb_u8(src, &mut gray)?;

    decode_gray(&gray)
}

/// Decode a grayscale image, retrying on a binarized copy when empty.
///
/// The first attempt runs on the grayscale input as-is. When it yields no
/// result, the image is binarized with a fixed cutoff of 128 and decoded
/// again.
pub fn decode_with_fallback(src: &Image<u8, 1>) -> Result<Vec<Decoded>, ScanError> {
    let results = decode_gray(src)?;
    if !results.is_empty() {
        return Ok(results);
    }

    let mut binary = Image::from_size_val(src.size(), 0)?;
    threshold_binary(src, &mut binary, BINARY_CUTOFF, u8::MAX)?;

    decode_gray(&binary)
}
