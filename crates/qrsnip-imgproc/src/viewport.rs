use qrsnip_image::ImageSize;

/// An axis-aligned rectangle in preview coordinates.
///
/// The rectangle is normalized on construction so that `min_x <= max_x` and
/// `min_y <= max_y` regardless of the direction the user dragged in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    /// Left edge in preview pixels.
    pub min_x: f32,
    /// Top edge in preview pixels.
    pub min_y: f32,
    /// Right edge in preview pixels.
    pub max_x: f32,
    /// Bottom edge in preview pixels.
    pub max_y: f32,
}

impl DisplayRect {
    /// Build a normalized rectangle from two opposite corners.
    pub fn from_corners(a: (f32, f32), b: (f32, f32)) -> Self {
        DisplayRect {
            min_x: a.0.min(b.0),
            min_y: a.1.min(b.1),
            max_x: a.0.max(b.0),
            max_y: a.1.max(b.1),
        }
    }

    /// Width of the rectangle in preview pixels.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height of the rectangle in preview pixels.
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// A rectangular region in source image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceRegion {
    /// The x-coordinate of the top-left corner.
    pub x: usize,
    /// The y-coordinate of the top-left corner.
    pub y: usize,
    /// Width of the region in pixels.
    pub width: usize,
    /// Height of the region in pixels.
    pub height: usize,
}

impl SourceRegion {
    /// Whether the region covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Compute the scale factor that fits `source` inside `bounds`.
///
/// The factor is the smaller of the horizontal and vertical ratios so that
/// the aspect ratio is preserved. The factor is meant to be applied
/// unconditionally, hence images smaller than the bounds scale up.
///
/// # Examples
///
/// ```
/// use qrsnip_image::ImageSize;
/// use qrsnip_imgproc::viewport::fit_scale;
///
/// let source = ImageSize { width: 1000, height: 2000 };
/// let bounds = ImageSize { width: 800, height: 600 };
///
/// assert_eq!(fit_scale(source, bounds), 0.3);
/// ```
pub fn fit_scale(source: ImageSize, bounds: ImageSize) -> f32 {
    let width_ratio = bounds.width as f32 / source.width as f32;
    let height_ratio = bounds.height as f32 / source.height as f32;
    width_ratio.min(height_ratio)
}

/// The preview size of `source` after scaling by `scale`.
///
/// Dimensions are rounded and floored at one pixel so the preview stays
/// a valid image even for extreme aspect ratios.
pub fn fitted_size(source: ImageSize, scale: f32) -> ImageSize {
    ImageSize {
        width: ((source.width as f32 * scale).round() as usize).max(1),
        height: ((source.height as f32 * scale).round() as usize).max(1),
    }
}

/// Map a preview-space rectangle back to source image coordinates.
///
/// Each corner is divided by `scale` and clamped to the source bounds, so
/// rectangles reaching past the preview edges yield a region that still
/// lies inside the image. A degenerate rectangle maps to an empty region.
pub fn to_source_region(rect: &DisplayRect, scale: f32, source: ImageSize) -> SourceRegion {
    let map = |v: f32, limit: usize| ((v / scale) as i64).clamp(0, limit as i64) as usize;

    let x0 = map(rect.min_x, source.width);
    let x1 = map(rect.max_x, source.width);
    let y0 = map(rect.min_y, source.height);
    let y1 = map(rect.max_y, source.height);

    SourceRegion {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    }
}
