use qrsnip_image::{Image, ImageDtype};

/// Interpolation mode for the resize operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Sample one channel at `(u, v)` with bilinear interpolation.
///
/// `(u, v)` must lie inside the source image bounds.
pub(crate) fn interpolate_bilinear<T, const C: usize>(
    src: &Image<T, C>,
    u: f32,
    v: f32,
    ch: usize,
) -> f32
where
    T: ImageDtype,
{
    let (cols, rows) = (src.cols(), src.rows());
    let data = src.as_slice();

    let u0 = u.floor() as usize;
    let v0 = v.floor() as usize;
    let u1 = (u0 + 1).min(cols - 1);
    let v1 = (v0 + 1).min(rows - 1);

    let frac_u = u - u0 as f32;
    let frac_v = v - v0 as f32;

    let val00 = data[(v0 * cols + u0) * C + ch].to_f32();
    let val01 = data[(v0 * cols + u1) * C + ch].to_f32();
    let val10 = data[(v1 * cols + u0) * C + ch].to_f32();
    let val11 = data[(v1 * cols + u1) * C + ch].to_f32();

    val00 * (1.0 - frac_u) * (1.0 - frac_v)
        + val01 * frac_u * (1.0 - frac_v)
        + val10 * (1.0 - frac_u) * frac_v
        + val11 * frac_u * frac_v
}

/// Sample one channel at `(u, v)` with nearest neighbor interpolation.
pub(crate) fn interpolate_nearest<T, const C: usize>(
    src: &Image<T, C>,
    u: f32,
    v: f32,
    ch: usize,
) -> f32
where
    T: ImageDtype,
{
    let cols = src.cols();
    let iu = (u.round() as usize).min(cols - 1);
    let iv = (v.round() as usize).min(src.rows() - 1);

    src.as_slice()[(iv * cols + iu) * C + ch].to_f32()
}
