/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Invalid file extension.
    #[error("File does not have a valid extension: {0}")]
    InvalidFileExtension(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] qrsnip_image::ImageError),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to parse the HEIF container.
    #[cfg(feature = "heif")]
    #[error("Failed to parse the HEIF container. {0}")]
    HeifParseError(String),

    /// Error to decode the HEIF payload.
    #[cfg(feature = "heif")]
    #[error("Failed to decode the HEIF payload. {0}")]
    HeifDecodeError(String),
}
