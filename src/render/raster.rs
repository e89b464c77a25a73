//! # Rasterizer
//!
//! Turns a decoded RGBA bitmap into a packed monochrome dot matrix sized for
//! the print head, then wraps it in a `GS v 0` command.
//!
//! ## Pipeline
//!
//! ```text
//! RgbaImage ──► resize to max width ──► composite on white ──► threshold
//!           (aspect preserved)                             │
//!                                                          ▼
//!                         GS v 0 header + rows ◄── pack 8 dots/byte
//! ```

use image::{GrayImage, Luma, RgbaImage, imageops::FilterType};
use rayon::prelude::*;

use super::threshold;
use crate::error::SetuError;
use crate::protocol::graphics;

/// Default print width in dots (58mm paper)
pub const DEFAULT_MAX_WIDTH: u32 = 384;

/// A monochrome bitmap packed one bit per dot, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    bytes_per_row: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap already-packed rows.
    ///
    /// Fails when `data` isn't exactly `ceil(width / 8) × height` bytes, or
    /// when either dimension is zero or exceeds the 16-bit header fields.
    pub fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SetuError> {
        check_dimensions(width, height)?;
        let bytes_per_row = width.div_ceil(8) as usize;
        if data.len() != bytes_per_row * height as usize {
            return Err(SetuError::InvalidCommand(format!(
                "raster data is {} bytes, expected {} ({} bytes × {} rows)",
                data.len(),
                bytes_per_row * height as usize,
                bytes_per_row,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            bytes_per_row,
            data,
        })
    }

    /// Build a raster from a per-dot predicate.
    pub fn from_fn<F>(width: u32, height: u32, dot: F) -> Result<Self, SetuError>
    where
        F: Fn(u32, u32) -> bool + Sync,
    {
        check_dimensions(width, height)?;
        let bytes_per_row = width.div_ceil(8) as usize;
        let mut data = vec![0u8; bytes_per_row * height as usize];

        data.par_chunks_mut(bytes_per_row)
            .enumerate()
            .for_each(|(y, row)| {
                let y = y as u32;
                threshold::pack_into(row, (0..width).map(|x| dot(x, y)));
            });

        Ok(Self {
            width,
            height,
            bytes_per_row,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    /// Packed row data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Whether the dot at (x, y) is printed.
    pub fn dot(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * self.bytes_per_row + x as usize / 8];
        (byte >> (7 - (x % 8))) & 1 == 1
    }

    /// Encode as a `GS v 0` raster command, ready for verbatim embedding.
    pub fn to_command(&self) -> Vec<u8> {
        // Dimensions were bounded to u16 at construction.
        graphics::raster(self.bytes_per_row as u16, self.height as u16, &self.data)
    }

    /// Black-on-white preview of what the print head will produce.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.dot(x, y) { Luma([0]) } else { Luma([255]) }
        })
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), SetuError> {
    if width == 0 || height == 0 {
        return Err(SetuError::Decode(format!(
            "image has zero dimension ({}x{})",
            width, height
        )));
    }
    let bytes_per_row = width.div_ceil(8);
    if bytes_per_row > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(SetuError::InvalidCommand(format!(
            "raster {}x{} exceeds the 16-bit size fields",
            width, height
        )));
    }
    Ok(())
}

/// Output dimensions after the aspect-preserving downscale.
///
/// Images no wider than `max_width` keep their size. Wider images are scaled
/// to exactly `max_width`, with height `floor(height × max_width / width)`
/// (never less than one row).
///
/// ```
/// use setu::render::raster::target_dimensions;
///
/// assert_eq!(target_dimensions(800, 600, 384), (384, 288));
/// assert_eq!(target_dimensions(200, 100, 384), (200, 100));
/// ```
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || max_width == 0 {
        return (width, height);
    }
    let scaled = (height as u64 * max_width as u64 / width as u64) as u32;
    (max_width, scaled.max(1))
}

/// Rasterize a bitmap for a print head `max_width` dots wide.
///
/// ## Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use setu::render::raster::rasterize;
///
/// let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
/// let raster = rasterize(&img, 384).unwrap();
/// assert_eq!(raster.to_command(), vec![0x1D, 0x76, 0x30, 0, 1, 0, 1, 0, 0x80]);
/// ```
///
/// ## Errors
///
/// [`SetuError::Decode`] for a zero-width or zero-height bitmap.
pub fn rasterize(bitmap: &RgbaImage, max_width: u32) -> Result<RasterImage, SetuError> {
    let (src_w, src_h) = bitmap.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(SetuError::Decode(format!(
            "image has zero dimension ({}x{})",
            src_w, src_h
        )));
    }

    let (width, height) = target_dimensions(src_w, src_h, max_width);

    let resized;
    let source = if (width, height) == (src_w, src_h) {
        bitmap
    } else {
        tracing::debug!(
            from_width = src_w,
            from_height = src_h,
            width,
            height,
            "downscaling bitmap to print width"
        );
        resized = image::imageops::resize(bitmap, width, height, FilterType::Triangle);
        &resized
    };

    let raster = RasterImage::from_fn(width, height, |x, y| {
        threshold::is_dot(*source.get_pixel(x, y))
    })?;

    tracing::debug!(
        width,
        height,
        bytes_per_row = raster.bytes_per_row(),
        "rasterized bitmap"
    );
    Ok(raster)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    #[test]
    fn test_single_black_pixel() {
        let img = RgbaImage::from_pixel(1, 1, BLACK);
        let raster = rasterize(&img, DEFAULT_MAX_WIDTH).unwrap();
        assert_eq!(raster.bytes_per_row(), 1);
        assert_eq!(raster.height(), 1);
        assert_eq!(raster.data(), &[0x80]);
    }

    #[test]
    fn test_single_transparent_pixel() {
        let img = RgbaImage::from_pixel(1, 1, CLEAR);
        let raster = rasterize(&img, DEFAULT_MAX_WIDTH).unwrap();
        assert_eq!(raster.data(), &[0x00]);
        assert_eq!(
            raster.to_command(),
            vec![0x1D, 0x76, 0x30, 0x00, 1, 0, 1, 0, 0x00]
        );
    }

    #[test]
    fn test_bytes_per_row_rounds_up() {
        for width in [1u32, 7, 8, 9, 15, 16, 17, 383, 384] {
            let img = RgbaImage::from_pixel(width, 3, WHITE);
            let raster = rasterize(&img, DEFAULT_MAX_WIDTH).unwrap();
            assert_eq!(raster.bytes_per_row(), width.div_ceil(8) as usize);
            assert_eq!(raster.data().len(), raster.bytes_per_row() * 3);
            assert_eq!(raster.to_command().len(), 8 + raster.data().len());
        }
    }

    #[test]
    fn test_trailing_bits_zero_padded() {
        // 10 black pixels: 0xFF, 0b1100_0000
        let img = RgbaImage::from_pixel(10, 1, BLACK);
        let raster = rasterize(&img, DEFAULT_MAX_WIDTH).unwrap();
        assert_eq!(raster.data(), &[0xFF, 0xC0]);
    }

    #[test]
    fn test_row_order_top_to_bottom() {
        let img = RgbaImage::from_fn(8, 2, |_, y| if y == 0 { BLACK } else { WHITE });
        let raster = rasterize(&img, DEFAULT_MAX_WIDTH).unwrap();
        assert_eq!(raster.data(), &[0xFF, 0x00]);
    }

    #[test]
    fn test_leftmost_dot_is_msb() {
        let img = RgbaImage::from_fn(8, 1, |x, _| if x == 0 { BLACK } else { WHITE });
        let raster = rasterize(&img, DEFAULT_MAX_WIDTH).unwrap();
        assert_eq!(raster.data(), &[0x80]);
        assert!(raster.dot(0, 0));
        assert!(!raster.dot(1, 0));
    }

    #[test]
    fn test_downscale_to_max_width() {
        let img = RgbaImage::from_pixel(1000, 500, BLACK);
        let raster = rasterize(&img, 384).unwrap();
        assert_eq!(raster.width(), 384);
        assert_eq!(raster.height(), 192);
        assert!(raster.data().iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_downscale_preserves_ratio_within_a_row() {
        for (w, h) in [(1001u32, 333u32), (500, 1234), (385, 1), (4096, 3000)] {
            let (nw, nh) = target_dimensions(w, h, 384);
            assert_eq!(nw, 384);
            let exact = h as f64 * 384.0 / w as f64;
            assert!((nh as f64 - exact).abs() <= 1.0, "{}x{} -> {}x{}", w, h, nw, nh);
        }
    }

    #[test]
    fn test_narrow_image_not_upscaled() {
        assert_eq!(target_dimensions(100, 50, 384), (100, 50));
        assert_eq!(target_dimensions(384, 50, 384), (384, 50));
    }

    #[test]
    fn test_zero_dimension_is_decode_error() {
        let img = RgbaImage::new(0, 10);
        assert!(matches!(rasterize(&img, 384), Err(SetuError::Decode(_))));
        let img = RgbaImage::new(10, 0);
        assert!(matches!(rasterize(&img, 384), Err(SetuError::Decode(_))));
    }

    #[test]
    fn test_from_packed_validates_length() {
        assert!(RasterImage::from_packed(16, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            RasterImage::from_packed(16, 2, vec![0; 3]),
            Err(SetuError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_gray_preview() {
        let raster = RasterImage::from_packed(8, 1, vec![0x80]).unwrap();
        let preview = raster.to_gray_image();
        assert_eq!(preview.get_pixel(0, 0), &Luma([0]));
        assert_eq!(preview.get_pixel(1, 0), &Luma([255]));
    }
}
