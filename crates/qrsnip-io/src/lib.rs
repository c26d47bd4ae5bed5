#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and decoding failures.
pub mod error;

/// High-level image reading functions.
///
/// See [`functional::read_image_any_rgb8`] for automatic format detection.
pub mod functional;

/// HEIF-family image decoding (feature-gated).
///
/// Decodes AVIF, HEIC and HEIF containers with AV1-coded payloads using
/// `avif-parse` and `rav1d`. Requires the `heif` feature flag.
#[cfg(feature = "heif")]
pub mod heif;

pub use crate::error::IoError;
