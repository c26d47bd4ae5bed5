#![deny(missing_docs)]
//! Image types and traits for the qrsnip tools.

/// image error types
pub mod error;

/// image types and traits
pub mod image;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
