//! # ESC/POS Raster Graphics
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```
//!
//! ## Paper Widths
//!
//! | Paper | Print width | Bytes per row |
//! |-------|-------------|---------------|
//! | 58mm | 384 dots | 48 |
//! | 80mm | 576 dots | 72 |

use super::commands::{GS, u16_le};

/// Length of the `GS v 0` header preceding the row data
pub const RASTER_HEADER_LEN: usize = 8;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Mode, always 0 (normal density)
/// - `xL, xH`: Bytes per row, little-endian
/// - `yL, yH`: Height in dots, little-endian
/// - `d1...dk`: Row data, k = bytes_per_row × height, top row first
///
/// ## Example
///
/// ```
/// use setu::protocol::graphics;
///
/// let data = vec![0xAA; 48 * 300];
/// let cmd = graphics::raster(48, 300, &data);
///
/// // 300 = 0x012C -> [0x2C, 0x01]
/// assert_eq!(&cmd[0..8], &[0x1D, 0x76, 0x30, 0x00, 48, 0, 0x2C, 0x01]);
/// assert_eq!(cmd.len(), 8 + 48 * 300);
/// ```
pub fn raster(bytes_per_row: u16, height: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() == bytes_per_row as usize * height as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        bytes_per_row as usize * height as usize,
        bytes_per_row,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(bytes_per_row);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(RASTER_HEADER_LEN + data.len());
    cmd.extend_from_slice(&[GS, b'v', b'0', 0, xl, xh, yl, yh]);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_header() {
        let data = vec![0xFF; 48 * 100];
        let cmd = raster(48, 100, &data);

        assert_eq!(cmd[0], 0x1D); // GS
        assert_eq!(cmd[1], 0x76); // 'v'
        assert_eq!(cmd[2], 0x30); // '0'
        assert_eq!(cmd[3], 0); // m
        assert_eq!(cmd[4], 48); // xL
        assert_eq!(cmd[5], 0); // xH
        assert_eq!(cmd[6], 100); // yL
        assert_eq!(cmd[7], 0); // yH
    }

    #[test]
    fn test_raster_large_dimensions() {
        let bytes_per_row: u16 = 300;
        let height: u16 = 500;
        let data = vec![0; bytes_per_row as usize * height as usize];
        let cmd = raster(bytes_per_row, height, &data);

        assert_eq!(&cmd[4..6], &[0x2C, 0x01]);
        assert_eq!(&cmd[6..8], &[0xF4, 0x01]);
    }

    #[test]
    fn test_raster_preserves_data() {
        let data: Vec<u8> = (0..48 * 50).map(|i| (i % 256) as u8).collect();
        let cmd = raster(48, 50, &data);
        assert_eq!(&cmd[RASTER_HEADER_LEN..], &data[..]);
    }

    #[test]
    fn test_raster_total_length() {
        let cmd = raster(1, 1, &[0x80]);
        assert_eq!(cmd, vec![0x1D, 0x76, 0x30, 0x00, 1, 0, 1, 0, 0x80]);
    }
}
