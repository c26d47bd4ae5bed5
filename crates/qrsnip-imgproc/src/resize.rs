use qrsnip_image::{Image, ImageDtype, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::interpolation::{interpolate_bilinear, interpolate_nearest, InterpolationMode};

/// Resize an image to a new size.
///
/// The function resizes an image to a new size with the given interpolation mode.
/// The destination image determines the output size, and both endpoints of the
/// source grid are mapped onto the destination corners.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container.
/// * `interpolation` - The interpolation mode to use.
///
/// Precondition: both images must be non-empty.
///
/// # Examples
///
/// ```
/// use qrsnip_image::{Image, ImageSize};
/// use qrsnip_imgproc::resize::resize_native;
/// use qrsnip_imgproc::interpolation::InterpolationMode;
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     0,
/// )
/// .unwrap();
///
/// let mut resized = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     0,
/// )
/// .unwrap();
///
/// resize_native(&image, &mut resized, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(resized.size().width, 2);
/// assert_eq!(resized.size().height, 3);
/// ```
pub fn resize_native<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    if src.cols() == 0 || src.rows() == 0 || dst.cols() == 0 || dst.rows() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // if the sizes are the same, copy the data
    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let dst_cols = dst.cols();

    // source step per destination pixel, with the corners aligned
    let u_scale = if dst.cols() > 1 {
        (src.cols() - 1) as f32 / (dst.cols() - 1) as f32
    } else {
        0.0
    };
    let v_scale = if dst.rows() > 1 {
        (src.rows() - 1) as f32 / (dst.rows() - 1) as f32
    } else {
        0.0
    };

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(row, dst_row)| {
            let v = row as f32 * v_scale;
            dst_row
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(col, dst_pixel)| {
                    let u = col as f32 * u_scale;
                    for (ch, pixel) in dst_pixel.iter_mut().enumerate() {
                        let val = match interpolation {
                            InterpolationMode::Bilinear => interpolate_bilinear(src, u, v, ch),
                            InterpolationMode::Nearest => interpolate_nearest(src, u, v, ch),
                        };
                        *pixel = T::from_f32(val);
                    }
                });
        });

    Ok(())
}
