//! # Luminance Thresholding
//!
//! Converts RGBA pixels to printed/blank dots and packs dots into raster
//! bytes.
//!
//! ## Per-Pixel Decision
//!
//! ```text
//! alpha <= 128                    → blank (background)
//! composite over white → (r,g,b)
//! 0.299r + 0.587g + 0.114b < 128  → printed
//! otherwise                       → blank
//! ```
//!
//! The same pixel always yields the same dot; there is no dithering.
//!
//! ## Usage Example
//!
//! ```
//! use image::Rgba;
//! use setu::render::threshold;
//!
//! assert!(threshold::is_dot(Rgba([0, 0, 0, 255])));
//! assert!(!threshold::is_dot(Rgba([0, 0, 0, 0])));
//!
//! let row = vec![true, true, false, false, true, false, true, false];
//! assert_eq!(threshold::pack_row(&row), vec![0b11001010]);
//! ```

use image::Rgba;

/// Pixels at or below this alpha are background.
pub const ALPHA_CUTOFF: u8 = 128;

/// Composited luminance strictly below this prints a dot.
pub const LUMINANCE_CUTOFF: f32 = 128.0;

/// ITU-R BT.601 luma.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Flatten a pixel onto an opaque white background.
///
/// ```
/// use image::Rgba;
/// use setu::render::threshold::composite_on_white;
///
/// assert_eq!(composite_on_white(Rgba([0, 0, 0, 255])), [0, 0, 0]);
/// assert_eq!(composite_on_white(Rgba([0, 0, 0, 0])), [255, 255, 255]);
/// ```
#[inline]
pub fn composite_on_white(pixel: Rgba<u8>) -> [u8; 3] {
    let [r, g, b, a] = pixel.0;
    let a = a as u32;
    let blend = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
    [blend(r), blend(g), blend(b)]
}

/// Whether a pixel prints as a black dot.
#[inline]
pub fn is_dot(pixel: Rgba<u8>) -> bool {
    if pixel.0[3] <= ALPHA_CUTOFF {
        return false;
    }
    let [r, g, b] = composite_on_white(pixel);
    luminance(r, g, b) < LUMINANCE_CUTOFF
}

/// Pack a row of dots into bytes.
///
/// ## Bit Packing
///
/// - Bit 7 (MSB) = leftmost pixel
/// - Bit 0 (LSB) = rightmost pixel
/// - 1 = black (print dot), 0 = white (no dot)
///
/// If the row length is not a multiple of 8, the last byte is padded
/// with zeros (white) on the right.
///
/// ```
/// use setu::render::threshold::pack_row;
///
/// let row = vec![true; 12];
/// assert_eq!(pack_row(&row), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];
    pack_into(&mut bytes, pixels.iter().copied());
    bytes
}

/// Pack dots into an existing row buffer, MSB first.
///
/// Dots beyond `out.len() * 8` are ignored; unset bits stay as they were.
pub fn pack_into(out: &mut [u8], dots: impl IntoIterator<Item = bool>) {
    for (i, dot) in dots.into_iter().enumerate() {
        let byte_idx = i / 8;
        if byte_idx >= out.len() {
            break;
        }
        if dot {
            out[byte_idx] |= 1 << (7 - (i % 8));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 255, 255) - 255.0).abs() < 0.01);
        assert!((luminance(255, 0, 0) - 76.245).abs() < 0.01);
    }

    #[test]
    fn test_transparent_is_blank() {
        assert!(!is_dot(Rgba([0, 0, 0, 0])));
        assert!(!is_dot(Rgba([0, 0, 0, 128])));
    }

    #[test]
    fn test_opaque_black_prints() {
        assert!(is_dot(Rgba([0, 0, 0, 255])));
        assert!(is_dot(Rgba([0, 0, 0, 129])));
    }

    #[test]
    fn test_white_and_light_grey_blank() {
        assert!(!is_dot(Rgba([255, 255, 255, 255])));
        assert!(!is_dot(Rgba([128, 128, 128, 255])));
        assert!(is_dot(Rgba([127, 127, 127, 255])));
    }

    #[test]
    fn test_pure_red_prints() {
        // 0.299 * 255 ≈ 76
        assert!(is_dot(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_pack_row_msb_first() {
        assert_eq!(pack_row(&[true]), vec![0x80]);
        assert_eq!(
            pack_row(&[false, false, false, false, false, false, false, true]),
            vec![0x01]
        );
    }

    #[test]
    fn test_pack_row_padding() {
        assert_eq!(pack_row(&[true; 9]), vec![0xFF, 0x80]);
        assert!(pack_row(&[]).is_empty());
    }

    #[test]
    fn test_pack_into_ignores_overflow() {
        let mut out = [0u8; 1];
        pack_into(&mut out, [true; 16]);
        assert_eq!(out, [0xFF]);
    }
}
