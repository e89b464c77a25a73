//! # Rendering Module
//!
//! Bitmap decoding and rasterization for thermal printers.
//!
//! ## Modules
//!
//! - [`threshold`]: Per-pixel luminance threshold and dot packing
//! - [`raster`]: Resize, binarize, and wrap bitmaps as `GS v 0` commands
//!
//! ## Usage Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use setu::render;
//!
//! let logo = RgbaImage::from_pixel(600, 200, Rgba([0, 0, 0, 255]));
//! let raster = render::raster::rasterize(&logo, 384).unwrap();
//! assert_eq!((raster.width(), raster.height()), (384, 128));
//!
//! let command = raster.to_command();
//! assert_eq!(command.len(), 8 + 48 * 128);
//! ```

pub mod raster;
pub mod threshold;

pub use raster::{DEFAULT_MAX_WIDTH, RasterImage, rasterize};

use image::RgbaImage;

use crate::error::SetuError;

/// Decode encoded image bytes (PNG, JPEG, GIF, BMP, WebP...) into RGBA.
///
/// ## Errors
///
/// [`SetuError::Decode`] when the format is unrecognized, the data is
/// corrupt, or the image has a zero dimension.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, SetuError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| SetuError::Decode(format!("Failed to decode image: {}", e)))?;
    if img.width() == 0 || img.height() == 0 {
        return Err(SetuError::Decode(format!(
            "image has zero dimension ({}x{})",
            img.width(),
            img.height()
        )));
    }
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let decoded = decode_image(&png_bytes(&img)).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, SetuError::Decode(_)));
    }

    #[test]
    fn test_decode_empty_fails() {
        assert!(matches!(decode_image(&[]), Err(SetuError::Decode(_))));
    }
}
