//! # ESC/POS Barcode Commands
//!
//! | Type | Command family | Capacity |
//! |------|----------------|----------|
//! | CODE39 | GS k 4 | Alphanumeric, short |
//! | QR Code | GS ( k | Up to ~7000 chars |
//!
//! ## QR Code Usage
//!
//! QR codes are generated in a multi-step process: select the model, set the
//! module size and error correction, store the payload in the symbol buffer,
//! then print it.
//!
//! ```
//! use setu::protocol::barcode::qr;
//!
//! let mut data = Vec::new();
//! data.extend(qr::set_model());
//! data.extend(qr::set_cell_size(6));
//! data.extend(qr::set_error_correction(qr::QrErrorLevel::M));
//! data.extend(qr::store_data(b"https://example.com").unwrap());
//! data.extend(qr::print());
//! ```
//!
//! ## 1D Barcode Usage
//!
//! ```
//! use setu::protocol::barcode::barcode1d;
//!
//! let mut data = Vec::new();
//! data.extend(barcode1d::set_height(50));
//! data.extend(barcode1d::set_width(2));
//! data.extend(barcode1d::code39(b"HELLO123"));
//! ```

use super::commands::{GS, NUL};

// ============================================================================
// 1D BARCODE COMMANDS (GS k)
// ============================================================================

/// 1D barcode command builders
pub mod barcode1d {
    use super::{GS, NUL};

    /// Default bar height in dots
    pub const DEFAULT_HEIGHT: u8 = 50;

    /// Default module width (2 = 0.25mm at 203 DPI)
    pub const DEFAULT_WIDTH: u8 = 2;

    /// Set barcode height in dots (GS h n)
    #[inline]
    pub fn set_height(height: u8) -> Vec<u8> {
        vec![GS, b'h', height]
    }

    /// # Set Barcode Module Width (GS w n)
    ///
    /// Valid widths are 2..=6; other values are clamped.
    #[inline]
    pub fn set_width(width: u8) -> Vec<u8> {
        vec![GS, b'w', width.clamp(2, 6)]
    }

    /// Whether `c` belongs to the CODE39 alphabet (upper case only).
    pub fn is_code39_char(c: char) -> bool {
        matches!(c, '0'..='9' | 'A'..='Z' | ' ' | '-' | '.' | '$' | '/' | '+' | '%')
    }

    /// # Print CODE39 (GS k 4 d1...dk NUL)
    ///
    /// The NUL-terminated form of `GS k`. Data must already be restricted to
    /// the CODE39 alphabet; see [`is_code39_char`].
    ///
    /// ```
    /// use setu::protocol::barcode::barcode1d;
    ///
    /// assert_eq!(
    ///     barcode1d::code39(b"A1"),
    ///     vec![0x1D, 0x6B, 0x04, b'A', b'1', 0x00],
    /// );
    /// ```
    pub fn code39(data: &[u8]) -> Vec<u8> {
        let mut cmd = Vec::with_capacity(4 + data.len());
        cmd.extend_from_slice(&[GS, b'k', 4]);
        cmd.extend_from_slice(data);
        cmd.push(NUL);
        cmd
    }
}

// ============================================================================
// QR CODE COMMANDS (GS ( k)
// ============================================================================

/// QR Code command builders
///
/// Every QR function is `GS ( k pL pH cn fn params`, where `pL pH` is the
/// little-endian count of bytes following them and `cn = 0x31` selects QR.
pub mod qr {
    use super::GS;
    use crate::protocol::commands::u16_le;

    /// Smallest module size in dots
    pub const MIN_CELL_SIZE: u8 = 1;

    /// Largest module size in dots
    pub const MAX_CELL_SIZE: u8 = 16;

    /// Largest payload the two-byte length field can describe
    pub const MAX_DATA_LEN: usize = u16::MAX as usize - 3;

    /// QR Code error correction level
    ///
    /// | Level | Recovery | n |
    /// |-------|----------|---|
    /// | L | ~7% | 48 |
    /// | M | ~15% | 49 |
    /// | Q | ~25% | 50 |
    /// | H | ~30% | 51 |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrErrorLevel {
        L = 0,
        #[default]
        M = 1,
        Q = 2,
        H = 3,
    }

    impl QrErrorLevel {
        /// Parse `L`, `M`, `Q` or `H` (case-insensitive).
        pub fn from_name(name: &str) -> Option<Self> {
            match name {
                "L" | "l" => Some(Self::L),
                "M" | "m" => Some(Self::M),
                "Q" | "q" => Some(Self::Q),
                "H" | "h" => Some(Self::H),
                _ => None,
            }
        }
    }

    /// Select model 2 (GS ( k 04 00 31 41 32 00)
    pub fn set_model() -> Vec<u8> {
        vec![GS, b'(', b'k', 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]
    }

    /// # Set Module Size (GS ( k 03 00 31 43 n)
    ///
    /// Clamped to [`MIN_CELL_SIZE`]..=[`MAX_CELL_SIZE`].
    ///
    /// ```
    /// use setu::protocol::barcode::qr;
    ///
    /// assert_eq!(qr::set_cell_size(40)[7], 16);
    /// assert_eq!(qr::set_cell_size(0)[7], 1);
    /// ```
    pub fn set_cell_size(size: u8) -> Vec<u8> {
        let size = size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE);
        vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x43, size]
    }

    /// Set error correction level (GS ( k 03 00 31 45 n), n = 48 + level
    pub fn set_error_correction(level: QrErrorLevel) -> Vec<u8> {
        vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x45, 48 + level as u8]
    }

    /// # Store Symbol Data (GS ( k pL pH 31 50 30 d1...dk)
    ///
    /// `pL pH` encodes `data.len() + 3` little-endian. Returns `None` when
    /// the payload is longer than [`MAX_DATA_LEN`].
    ///
    /// ```
    /// use setu::protocol::barcode::qr;
    ///
    /// let cmd = qr::store_data(b"hi").unwrap();
    /// assert_eq!(cmd, vec![0x1D, 0x28, 0x6B, 5, 0, 0x31, 0x50, 0x30, b'h', b'i']);
    /// assert!(qr::store_data(&vec![b'x'; qr::MAX_DATA_LEN + 1]).is_none());
    /// ```
    pub fn store_data(data: &[u8]) -> Option<Vec<u8>> {
        let len = u16::try_from(data.len() + 3).ok()?;
        let [pl, ph] = u16_le(len);

        let mut cmd = Vec::with_capacity(8 + data.len());
        cmd.extend_from_slice(&[GS, b'(', b'k', pl, ph, 0x31, 0x50, 0x30]);
        cmd.extend_from_slice(data);
        Some(cmd)
    }

    /// Print the stored symbol (GS ( k 03 00 31 51 30)
    pub fn print() -> Vec<u8> {
        vec![GS, b'(', b'k', 0x03, 0x00, 0x31, 0x51, 0x30]
    }
}

// ============================================================================
// TESTS
// ============================================================================
