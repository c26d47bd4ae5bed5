use crate::error::ImageError;

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use qrsnip_image::ImageSize;
///
/// let image_size = ImageSize {
///     width: 10,
///     height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<(usize, usize)> for ImageSize {
    fn from(size: (usize, usize)) -> Self {
        ImageSize {
            width: size.0,
            height: size.1,
        }
    }
}

/// Trait for the scalar types an [`Image`] can hold.
///
/// The `Send + Sync` bounds allow pixel loops to be parallelized.
pub trait ImageDtype: Copy + Default + Send + Sync {
    /// Convert an interpolated `f32` value back into the scalar type.
    fn from_f32(x: f32) -> Self;
    /// Widen the scalar to `f32` for arithmetic.
    fn to_f32(self) -> f32;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }

    fn to_f32(self) -> f32 {
        self
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }

    fn to_f32(self) -> f32 {
        self as f32
    }
}

/// Represents an image with pixel data in row-major (HWC) layout.
///
/// The image is parametrized by the pixel type `T` and the number of
/// channels `C`. Channel values of one pixel are stored contiguously.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const C: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const C: usize> Image<T, C> {
    /// Create a new image from raw pixel data.
    ///
    /// The length of `data` must be exactly `width * height * C`.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data in row-major interleaved layout.
    ///
    /// # Returns
    ///
    /// A new image if the data length matches the size, an error otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use qrsnip_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.width * size.height * C;
        if data.len() != expected {
            return Err(ImageError::InvalidDataLength(data.len(), expected));
        }

        Ok(Image { size, data })
    }

    /// Create a new image filled with a constant value.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The value to fill every channel of every pixel with.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let data = vec![val; size.width * size.height * C];
        Image::new(size, data)
    }

    /// Size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of channels of the image.
    pub fn num_channels(&self) -> usize {
        C
    }

    /// The pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// The pixel data as a mutable flat slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// Consume the image and return the pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get a reference to the channel value of the pixel at `(x, y)`.
    ///
    /// Returns `None` if the coordinates or the channel are out of bounds.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Option<&T> {
        if x >= self.size.width || y >= self.size.height || ch >= C {
            return None;
        }

        self.data.get((y * self.size.width + x) * C + ch)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ImageError;
    use crate::image::{Image, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.cols(), 10);
        assert_eq!(image.rows(), 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_data_mismatch() {
        let result = Image::<u8, 3>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            vec![0u8; 4 * 4],
        );
        assert!(result.is_err());
    }

    #[test]
    fn image_from_size_val() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            128,
        )?;
        assert_eq!(image.as_slice(), &[128; 6]);

        Ok(())
    }

    #[test]
    fn image_get() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 3],
        )?;
        assert_eq!(image.get(1, 0, 0), Some(&1));
        assert_eq!(image.get(0, 1, 0), Some(&2));
        assert_eq!(image.get(2, 0, 0), None);
        assert_eq!(image.get(0, 0, 1), None);

        Ok(())
    }

    #[test]
    fn image_size_from_tuple() {
        let size = ImageSize::from((10, 20));
        assert_eq!(size.width, 10);
        assert_eq!(size.height, 20);
    }
}
