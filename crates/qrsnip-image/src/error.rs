/// An error type for image operations.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the image data is not contiguous.
    #[error("Image data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the image sizes of an operation do not agree.
    #[error("Invalid image size ({0}, {1}) != ({2}, {3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a requested region falls outside the image bounds.
    #[error("Region of size {0}x{1} at offset ({2}, {3}) exceeds the image bounds")]
    InvalidRegion(usize, usize, usize, usize),
}
