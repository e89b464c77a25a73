//! # ESC/POS Text Styling Commands
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Bold | ESC E n | **Emphasized** text |
//! | Underline | ESC - n | Underlined text |
//! | Italic | ESC 4 / ESC 5 | Slanted text (clone firmwares only) |
//! | Reverse | GS B n | White on black |
//! | Rotate | ESC V n | 90° clockwise |
//! | Size | GS ! n / ESC ! n | Width/height multipliers |
//! | Density | ESC G n | Double-strike (darker) |
//!
//! ## Text Alignment
//!
//! ```text
//! Left aligned (default)    |LEFT TEXT
//! Center aligned            |  CENTER TEXT
//! Right aligned             |      RIGHT TEXT
//! ```
//!
//! Alignment takes effect at the start of the next line.

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Alignment {
    /// Parse an alignment name (`left`, `center`, `right`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | ESC a n  |
/// | Hex     | 1B 61 n  |
///
/// ```
/// use setu::protocol::text::{align, Alignment};
///
/// assert_eq!(align(Alignment::Center), vec![0x1B, 0x61, 0x01]);
/// ```
pub fn align(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

#[inline]
pub fn align_left() -> Vec<u8> {
    align(Alignment::Left)
}

#[inline]
pub fn align_center() -> Vec<u8> {
    align(Alignment::Center)
}

#[inline]
pub fn align_right() -> Vec<u8> {
    align(Alignment::Right)
}

// ============================================================================
// EMPHASIS
// ============================================================================

/// Bold on (ESC E 1)
#[inline]
pub fn bold_on() -> Vec<u8> {
    vec![ESC, b'E', 1]
}

/// Bold off (ESC E 0)
#[inline]
pub fn bold_off() -> Vec<u8> {
    vec![ESC, b'E', 0]
}

/// Underline on (ESC - 1)
#[inline]
pub fn underline_on() -> Vec<u8> {
    vec![ESC, b'-', 1]
}

/// Underline off (ESC - 0)
#[inline]
pub fn underline_off() -> Vec<u8> {
    vec![ESC, b'-', 0]
}

/// # Italic On (ESC 4)
///
/// Not part of the EPSON command set. Firmwares that don't know it print
/// the `4` as a literal character, so callers should gate it on
/// [`Capabilities::italic`](crate::printer::Capabilities).
#[inline]
pub fn italic_on() -> Vec<u8> {
    vec![ESC, b'4']
}

/// Italic off (ESC 5)
#[inline]
pub fn italic_off() -> Vec<u8> {
    vec![ESC, b'5']
}

/// Reverse (white on black) on/off (GS B n)
#[inline]
pub fn reverse(enabled: bool) -> Vec<u8> {
    vec![GS, b'B', enabled as u8]
}

/// 90° clockwise rotation on/off (ESC V n)
#[inline]
pub fn rotate(enabled: bool) -> Vec<u8> {
    vec![ESC, b'V', enabled as u8]
}

/// Double-strike on (dark) / off (light) (ESC G n)
#[inline]
pub fn density(dark: bool) -> Vec<u8> {
    vec![ESC, b'G', dark as u8]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// Character size presets.
///
/// `Normal`, `DoubleHeight`, `DoubleWidth` and `Double` use `GS ! n`.
/// `Small` through `XLarge` use the print-mode command `ESC ! n`, which
/// more firmwares accept.
///
/// | Preset | Command | n |
/// |--------|---------|---|
/// | Normal | GS ! | 0x00 |
/// | DoubleHeight | GS ! | 0x01 |
/// | DoubleWidth | GS ! | 0x10 |
/// | Double | GS ! | 0x11 |
/// | Small | ESC ! | 0x00 |
/// | Medium | ESC ! | 0x10 |
/// | Large | ESC ! | 0x01 |
/// | XLarge | ESC ! | 0x11 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextSize {
    #[default]
    Normal,
    Small,
    Medium,
    Large,
    XLarge,
    DoubleHeight,
    DoubleWidth,
    Double,
}

impl TextSize {
    /// Parse a size name. Accepts camelCase and snake_case spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "normal" => Self::Normal,
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            "xlarge" => Self::XLarge,
            "doubleHeight" | "double_height" => Self::DoubleHeight,
            "doubleWidth" | "double_width" => Self::DoubleWidth,
            "double" => Self::Double,
            _ => return None,
        })
    }
}

/// Emit the command for a size preset.
///
/// ```
/// use setu::protocol::text::{size, TextSize};
///
/// assert_eq!(size(TextSize::Double), vec![0x1D, 0x21, 0x11]);
/// assert_eq!(size(TextSize::Medium), vec![0x1B, 0x21, 0x10]);
/// ```
pub fn size(preset: TextSize) -> Vec<u8> {
    match preset {
        TextSize::Normal => vec![GS, b'!', 0x00],
        TextSize::DoubleHeight => vec![GS, b'!', 0x01],
        TextSize::DoubleWidth => vec![GS, b'!', 0x10],
        TextSize::Double => vec![GS, b'!', 0x11],
        TextSize::Small => vec![ESC, b'!', 0x00],
        TextSize::Medium => vec![ESC, b'!', 0x10],
        TextSize::Large => vec![ESC, b'!', 0x01],
        TextSize::XLarge => vec![ESC, b'!', 0x11],
    }
}

#[inline]
pub fn size_normal() -> Vec<u8> {
    size(TextSize::Normal)
}

// ============================================================================
// SPACING
// ============================================================================

/// Line spacing presets, or a custom value in motion units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSpacing {
    /// ESC 2
    #[default]
    Default,
    /// ESC 3 32
    Tight,
    /// ESC 3 64
    Loose,
    /// ESC 3 n
    Custom(u8),
}

impl LineSpacing {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Default),
            "tight" => Some(Self::Tight),
            "loose" => Some(Self::Loose),
            _ => None,
        }
    }

    /// Custom spacing from an arbitrary integer. Values outside 0..=255
    /// have no encoding and yield `None`.
    pub fn from_units(n: i64) -> Option<Self> {
        u8::try_from(n).ok().map(Self::Custom)
    }
}

/// # Set Line Spacing (ESC 3 n)
#[inline]
pub fn set_line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

/// Emit the command for a line spacing setting.
pub fn line_spacing(spacing: LineSpacing) -> Vec<u8> {
    match spacing {
        LineSpacing::Default => vec![ESC, b'2'],
        LineSpacing::Tight => set_line_spacing(0x20),
        LineSpacing::Loose => set_line_spacing(0x40),
        LineSpacing::Custom(n) => set_line_spacing(n),
    }
}

/// Right-side character spacing presets (ESC SP n).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSpacing {
    #[default]
    Default,
    /// n = 0xF8
    Tight,
    /// n = 8
    Wide,
}

impl CharSpacing {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Default),
            "tight" => Some(Self::Tight),
            "wide" => Some(Self::Wide),
            _ => None,
        }
    }
}

pub fn char_spacing(spacing: CharSpacing) -> Vec<u8> {
    let n = match spacing {
        CharSpacing::Default => 0x00,
        CharSpacing::Tight => 0xF8,
        CharSpacing::Wide => 0x08,
    };
    vec![ESC, b' ', n]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align() {
        assert_eq!(align_left(), vec![0x1B, 0x61, 0x00]);
        assert_eq!(align_center(), vec![0x1B, 0x61, 0x01]);
        assert_eq!(align_right(), vec![0x1B, 0x61, 0x02]);
    }

    #[test]
    fn test_alignment_from_name() {
        assert_eq!(Alignment::from_name("center"), Some(Alignment::Center));
        assert_eq!(Alignment::from_name("justify"), None);
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(bold_on(), vec![0x1B, 0x45, 0x01]);
        assert_eq!(bold_off(), vec![0x1B, 0x45, 0x00]);
        assert_eq!(underline_on(), vec![0x1B, 0x2D, 0x01]);
        assert_eq!(underline_off(), vec![0x1B, 0x2D, 0x00]);
        assert_eq!(italic_on(), vec![0x1B, 0x34]);
        assert_eq!(italic_off(), vec![0x1B, 0x35]);
    }

    #[test]
    fn test_reverse_rotate_density() {
        assert_eq!(reverse(true), vec![0x1D, 0x42, 0x01]);
        assert_eq!(reverse(false), vec![0x1D, 0x42, 0x00]);
        assert_eq!(rotate(true), vec![0x1B, 0x56, 0x01]);
        assert_eq!(density(true), vec![0x1B, 0x47, 0x01]);
        assert_eq!(density(false), vec![0x1B, 0x47, 0x00]);
    }

    #[test]
    fn test_sizes() {
        assert_eq!(size(TextSize::Normal), vec![0x1D, 0x21, 0x00]);
        assert_eq!(size(TextSize::DoubleHeight), vec![0x1D, 0x21, 0x01]);
        assert_eq!(size(TextSize::DoubleWidth), vec![0x1D, 0x21, 0x10]);
        assert_eq!(size(TextSize::Small), vec![0x1B, 0x21, 0x00]);
        assert_eq!(size(TextSize::Large), vec![0x1B, 0x21, 0x01]);
        assert_eq!(size(TextSize::XLarge), vec![0x1B, 0x21, 0x11]);
    }

    #[test]
    fn test_size_from_name() {
        assert_eq!(TextSize::from_name("doubleHeight"), Some(TextSize::DoubleHeight));
        assert_eq!(TextSize::from_name("double_width"), Some(TextSize::DoubleWidth));
        assert_eq!(TextSize::from_name("triple"), None);
    }

    #[test]
    fn test_line_spacing() {
        assert_eq!(line_spacing(LineSpacing::Default), vec![0x1B, 0x32]);
        assert_eq!(line_spacing(LineSpacing::Tight), vec![0x1B, 0x33, 0x20]);
        assert_eq!(line_spacing(LineSpacing::Loose), vec![0x1B, 0x33, 0x40]);
        assert_eq!(line_spacing(LineSpacing::Custom(90)), vec![0x1B, 0x33, 90]);
    }

    #[test]
    fn test_line_spacing_from_units_range() {
        assert_eq!(LineSpacing::from_units(0), Some(LineSpacing::Custom(0)));
        assert_eq!(LineSpacing::from_units(255), Some(LineSpacing::Custom(255)));
        assert_eq!(LineSpacing::from_units(256), None);
        assert_eq!(LineSpacing::from_units(-1), None);
    }

    #[test]
    fn test_char_spacing() {
        assert_eq!(char_spacing(CharSpacing::Default), vec![0x1B, 0x20, 0x00]);
        assert_eq!(char_spacing(CharSpacing::Tight), vec![0x1B, 0x20, 0xF8]);
        assert_eq!(char_spacing(CharSpacing::Wide), vec![0x1B, 0x20, 0x08]);
    }
}
