#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image cropping module.
pub mod crop;

/// utilities for interpolation.
pub mod interpolation;

/// module containing parallization utilities.
pub mod parallel;

/// image resizing module.
pub mod resize;

/// image thresholding module.
pub mod threshold;

/// preview scaling and region mapping module.
pub mod viewport;
