use std::path::Path;

use qrsnip_image::{Image, ImageSize};

use crate::error::IoError;

/// File extensions of the HEIF container family handled by this module.
pub(crate) const HEIF_EXTENSIONS: &[&str] = &["avif", "heic", "heif"];

/// Whether the path carries a HEIF-family extension.
pub(crate) fn is_heif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| HEIF_EXTENSIONS.iter().any(|h| e.eq_ignore_ascii_case(h)))
}

/// Reads a HEIF-family image (AVIF, HEIC, HEIF) from the given file path.
///
/// The container is parsed with `avif-parse` and the primary item payload is
/// decoded with `rav1d`, so only AV1-coded payloads are supported. HEIC files
/// carrying HEVC payloads fail at the container stage, as no pure Rust HEVC
/// decoder exists.
///
/// # Arguments
///
/// * `file_path` - The path to a HEIF-family image.
///
/// # Returns
///
/// An RGB8 image containing the decoded primary item.
pub fn read_image_heif(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    if !is_heif(&file_path) {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }

    let file_data = std::fs::read(&file_path)?;
    let avif = avif_parse::read_avif(&mut std::io::Cursor::new(&file_data))
        .map_err(|e| IoError::HeifParseError(format!("{e:?}")))?;

    let (rgb, size) = decode_av1_payload(&avif.primary_item)?;

    Ok(Image::new(size, rgb)?)
}

/// Decode one AV1 still frame into interleaved RGB8 pixel data.
fn decode_av1_payload(av1_bytes: &[u8]) -> Result<(Vec<u8>, ImageSize), IoError> {
    use rav1d::include::dav1d::data::Dav1dData;
    use rav1d::include::dav1d::dav1d::Dav1dSettings;
    use rav1d::include::dav1d::headers::{
        DAV1D_PIXEL_LAYOUT_I400, DAV1D_PIXEL_LAYOUT_I420, DAV1D_PIXEL_LAYOUT_I422,
        DAV1D_PIXEL_LAYOUT_I444,
    };
    use rav1d::include::dav1d::picture::Dav1dPicture;
    use std::ptr::NonNull;

    // a still image needs a single decode thread and no frame delay
    let mut settings = std::mem::MaybeUninit::<Dav1dSettings>::uninit();
    unsafe { rav1d::src::lib::dav1d_default_settings(NonNull::from(&mut settings).cast()) };
    let mut settings = unsafe { settings.assume_init() };
    settings.n_threads = 1;
    settings.max_frame_delay = 1;

    let mut ctx = None;
    let rc =
        unsafe { rav1d::src::lib::dav1d_open(NonNull::new(&mut ctx), NonNull::new(&mut settings)) };
    if rc.0 != 0 {
        return Err(IoError::HeifDecodeError(format!(
            "decoder open failed ({})",
            rc.0
        )));
    }

    // hand the payload to the decoder through its own buffer
    let mut data = Dav1dData::default();
    let buf_ptr =
        unsafe { rav1d::src::lib::dav1d_data_create(NonNull::new(&mut data), av1_bytes.len()) };
    if buf_ptr.is_null() {
        unsafe { rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx)) };
        return Err(IoError::HeifDecodeError(
            "data buffer allocation failed".into(),
        ));
    }
    unsafe { std::ptr::copy_nonoverlapping(av1_bytes.as_ptr(), buf_ptr, av1_bytes.len()) };

    let rc = unsafe { rav1d::src::lib::dav1d_send_data(ctx, NonNull::new(&mut data)) };
    if rc.0 != 0 {
        unsafe {
            rav1d::src::lib::dav1d_data_unref(NonNull::new(&mut data));
            rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx));
        }
        return Err(IoError::HeifDecodeError(format!(
            "send data failed ({})",
            rc.0
        )));
    }

    let mut pic: Dav1dPicture = unsafe { std::mem::zeroed() };
    let rc = unsafe { rav1d::src::lib::dav1d_get_picture(ctx, NonNull::new(&mut pic)) };
    if rc.0 != 0 {
        unsafe { rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx)) };
        return Err(IoError::HeifDecodeError(format!(
            "no picture decoded ({})",
            rc.0
        )));
    }

    let width = pic.p.w as u32;
    let height = pic.p.h as u32;
    let bpc = pic.p.bpc as u32;
    let layout = pic.p.layout;
    let y_stride = pic.stride[0];
    let uv_stride = pic.stride[1];

    let Some(y_plane) = pic.data[0] else {
        unsafe {
            rav1d::src::lib::dav1d_picture_unref(NonNull::new(&mut pic));
            rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx));
        }
        return Err(IoError::HeifDecodeError("missing luma plane".into()));
    };
    let y_ptr = y_plane.as_ptr() as *const u8;

    let rgb = if layout == DAV1D_PIXEL_LAYOUT_I400 {
        PlanarYuv {
            y_ptr,
            u_ptr: y_ptr,
            v_ptr: y_ptr,
            y_stride,
            uv_stride: 0,
            width,
            height,
            bpc,
            ss_x: false,
            ss_y: false,
            monochrome: true,
        }
        .to_rgb()
    } else {
        let (Some(u_plane), Some(v_plane)) = (pic.data[1], pic.data[2]) else {
            unsafe {
                rav1d::src::lib::dav1d_picture_unref(NonNull::new(&mut pic));
                rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx));
            }
            return Err(IoError::HeifDecodeError("missing chroma planes".into()));
        };

        let (ss_x, ss_y) = match layout {
            DAV1D_PIXEL_LAYOUT_I420 => (true, true),
            DAV1D_PIXEL_LAYOUT_I422 => (true, false),
            DAV1D_PIXEL_LAYOUT_I444 => (false, false),
            _ => {
                unsafe {
                    rav1d::src::lib::dav1d_picture_unref(NonNull::new(&mut pic));
                    rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx));
                }
                return Err(IoError::HeifDecodeError(format!(
                    "unsupported pixel layout: {layout}"
                )));
            }
        };

        PlanarYuv {
            y_ptr,
            u_ptr: u_plane.as_ptr() as *const u8,
            v_ptr: v_plane.as_ptr() as *const u8,
            y_stride,
            uv_stride,
            width,
            height,
            bpc,
            ss_x,
            ss_y,
            monochrome: false,
        }
        .to_rgb()
    };

    unsafe {
        rav1d::src::lib::dav1d_picture_unref(NonNull::new(&mut pic));
        rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx));
    }

    Ok((
        rgb,
        ImageSize {
            width: width as usize,
            height: height as usize,
        },
    ))
}

/// Decoded YUV plane pointers, ready for RGB conversion.
struct PlanarYuv {
    y_ptr: *const u8,
    u_ptr: *const u8,
    v_ptr: *const u8,
    y_stride: isize,
    uv_stride: isize,
    width: u32,
    height: u32,
    bpc: u32,
    /// Chroma subsampling along x and y (e.g. I420 = true, true).
    ss_x: bool,
    ss_y: bool,
    monochrome: bool,
}

impl PlanarYuv {
    /// Convert the planes to interleaved RGB8 with BT.601 coefficients.
    fn to_rgb(&self) -> Vec<u8> {
        let max_val = ((1u32 << self.bpc) - 1) as f32;
        let center = (1u32 << (self.bpc - 1)) as f32;
        let scale = 255.0 / max_val;

        let mut rgb = vec![0u8; (self.width * self.height * 3) as usize];

        for row in 0..self.height {
            for col in 0..self.width {
                let y_val = plane_sample(self.y_ptr, self.y_stride, col, row, self.bpc);

                let (r, g, b) = if self.monochrome {
                    let v = (y_val * scale).clamp(0.0, 255.0);
                    (v, v, v)
                } else {
                    let u_col = if self.ss_x { col / 2 } else { col };
                    let u_row = if self.ss_y { row / 2 } else { row };
                    let cb = plane_sample(self.u_ptr, self.uv_stride, u_col, u_row, self.bpc);
                    let cr = plane_sample(self.v_ptr, self.uv_stride, u_col, u_row, self.bpc);

                    let cb_f = cb - center;
                    let cr_f = cr - center;

                    (
                        ((y_val + 1.402 * cr_f) * scale).clamp(0.0, 255.0),
                        ((y_val - 0.344136 * cb_f - 0.714136 * cr_f) * scale).clamp(0.0, 255.0),
                        ((y_val + 1.772 * cb_f) * scale).clamp(0.0, 255.0),
                    )
                };

                let idx = ((row * self.width + col) * 3) as usize;
                rgb[idx] = r as u8;
                rgb[idx + 1] = g as u8;
                rgb[idx + 2] = b as u8;
            }
        }

        rgb
    }
}

/// Read one sample from a plane, handling 8-bit and 16-bit storage.
#[inline]
fn plane_sample(ptr: *const u8, stride: isize, x: u32, y: u32, bpc: u32) -> f32 {
    if bpc <= 8 {
        (unsafe { *ptr.offset(y as isize * stride + x as isize) }) as f32
    } else {
        // 10-bit and 12-bit samples are stored as u16
        let byte_offset = y as isize * stride + x as isize * 2;
        (unsafe { *(ptr.offset(byte_offset) as *const u16) }) as f32
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::error::IoError;

    /// Encode a small AVIF file to exercise the decoder against.
    fn create_test_avif(path: &Path, width: u32, height: u32) {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(writer, 6, 85);
        image::DynamicImage::ImageRgb8(img)
            .write_with_encoder(encoder)
            .unwrap();
    }

    #[test]
    fn read_heif_roundtrip() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("test.avif");
        create_test_avif(&file_path, 64, 48);

        let image = super::read_image_heif(&file_path)?;
        assert_eq!(image.size().width, 64);
        assert_eq!(image.size().height, 48);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn read_heif_rejects_foreign_extension() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("test.png");
        std::fs::write(&file_path, b"not an image")?;

        let result = super::read_image_heif(&file_path);
        assert!(matches!(result, Err(IoError::InvalidFileExtension(_))));

        Ok(())
    }

    #[test]
    fn read_heif_garbage_container() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("test.heic");
        std::fs::write(&file_path, b"definitely not a heif container")?;

        let result = super::read_image_heif(&file_path);
        assert!(matches!(result, Err(IoError::HeifParseError(_))));

        Ok(())
    }

    #[test]
    fn heif_extension_detection() {
        assert!(super::is_heif(Path::new("photo.HEIC")));
        assert!(super::is_heif(Path::new("photo.heif")));
        assert!(super::is_heif(Path::new("photo.avif")));
        assert!(!super::is_heif(Path::new("photo.png")));
        assert!(!super::is_heif(Path::new("photo")));
    }
}
