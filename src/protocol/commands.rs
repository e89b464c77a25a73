//! # ESC/POS Control Commands
//!
//! Initialization, paper feed, cutter, beeper and cash drawer commands for
//! ESC/POS thermal receipt printers.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Two bytes: `ESC @`, `ESC 2`
//! - Multi-byte with parameters: `ESC d n`, `GS V m`, `GS ( k pL pH ...`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, cutter, barcodes, QR codes and raster graphics.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

/// NUL terminator used by the variable-length barcode form
pub const NUL: u8 = 0x00;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets text formatting, character size,
/// alignment and line spacing to power-on defaults.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use setu::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// Alternate reset sequence (ESC ESC @)
///
/// A stray ESC followed by a regular initialize. Some clone firmwares latch
/// a half-received escape sequence; the leading ESC flushes it.
#[inline]
pub fn reset_alternate() -> Vec<u8> {
    vec![ESC, ESC, b'@']
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// Single line feed (LF)
#[inline]
pub fn newline() -> Vec<u8> {
    vec![LF]
}

/// # Print and Feed n Lines (ESC d n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC d n  |
/// | Hex     | 1B 64 n  |
///
/// ```
/// use setu::protocol::commands;
///
/// assert_eq!(commands::feed_lines(3), vec![0x1B, 0x64, 3]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Print and Feed Paper (ESC J n)
///
/// Feeds by `n` motion units. The fixed table entry uses 64 units.
#[inline]
pub fn feed_units(n: u8) -> Vec<u8> {
    vec![ESC, b'J', n]
}

/// Fixed paper feed (ESC J 64)
#[inline]
pub fn feed_paper() -> Vec<u8> {
    feed_units(0x40)
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Full Cut (GS V 0)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V 0   |
/// | Hex     | 1D 56 00 |
#[inline]
pub fn cut_full() -> Vec<u8> {
    vec![GS, b'V', 0]
}

/// # Partial Cut (GS V 1)
///
/// Leaves a small hinge connecting the receipt to the roll.
#[inline]
pub fn cut_partial() -> Vec<u8> {
    vec![GS, b'V', 1]
}

/// Feed `lines` lines, then cut (ESC d n GS V m)
///
/// ```
/// use setu::protocol::commands;
///
/// assert_eq!(
///     commands::feed_and_cut(3, false),
///     vec![0x1B, 0x64, 3, 0x1D, 0x56, 0],
/// );
/// ```
pub fn feed_and_cut(lines: u8, partial: bool) -> Vec<u8> {
    let mut cmd = feed_lines(lines);
    cmd.extend(if partial { cut_partial() } else { cut_full() });
    cmd
}

/// Feed three lines then full cut
#[inline]
pub fn cut_full_feed() -> Vec<u8> {
    feed_and_cut(3, false)
}

/// Feed three lines then partial cut
#[inline]
pub fn cut_partial_feed() -> Vec<u8> {
    feed_and_cut(3, true)
}

// ============================================================================
// PERIPHERALS
// ============================================================================

/// # Beeper (ESC B n t)
///
/// Sounds the buzzer once for ~100ms.
#[inline]
pub fn beep() -> Vec<u8> {
    vec![ESC, b'B', 1, 1]
}

/// # Generate Drawer Pulse (ESC p m t1 t2)
///
/// Pulses drawer connector pin 2 for 96ms on, 240ms off
/// (t1 = 0x60, t2 = 0x78, in 2ms units).
#[inline]
pub fn open_drawer() -> Vec<u8> {
    vec![ESC, b'p', 0, 0x60, 0x78]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use setu::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(384), [0x80, 0x01]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_reset_alternate() {
        assert_eq!(reset_alternate(), vec![0x1B, 0x1B, 0x40]);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(0), vec![0x1B, 0x64, 0x00]);
        assert_eq!(feed_lines(5), vec![0x1B, 0x64, 0x05]);
        assert_eq!(feed_lines(255), vec![0x1B, 0x64, 0xFF]);
    }

    #[test]
    fn test_feed_paper() {
        assert_eq!(feed_paper(), vec![0x1B, 0x4A, 0x40]);
    }

    #[test]
    fn test_cuts() {
        assert_eq!(cut_full(), vec![0x1D, 0x56, 0x00]);
        assert_eq!(cut_partial(), vec![0x1D, 0x56, 0x01]);
        assert_eq!(cut_full_feed(), vec![0x1B, 0x64, 0x03, 0x1D, 0x56, 0x00]);
        assert_eq!(cut_partial_feed(), vec![0x1B, 0x64, 0x03, 0x1D, 0x56, 0x01]);
    }

    #[test]
    fn test_feed_and_cut_line_count() {
        assert_eq!(feed_and_cut(7, true), vec![0x1B, 0x64, 7, 0x1D, 0x56, 1]);
    }

    #[test]
    fn test_peripherals() {
        assert_eq!(beep(), vec![0x1B, 0x42, 0x01, 0x01]);
        assert_eq!(open_drawer(), vec![0x1B, 0x70, 0x00, 0x60, 0x78]);
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
        assert_eq!(u16_le(48), [0x30, 0x00]);
    }
}
