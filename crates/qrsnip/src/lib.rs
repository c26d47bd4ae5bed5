#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use qrsnip_image as image;

#[doc(inline)]
pub use qrsnip_imgproc as imgproc;

#[doc(inline)]
pub use qrsnip_io as io;

#[doc(inline)]
pub use qrsnip_scan as scan;
