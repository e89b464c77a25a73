//! # Printer Profiles
//!
//! Hardware characteristics of the two common ESC/POS receipt formats.
//!
//! | Profile | Paper | Width (dots) | Columns (Font A) | Resolution |
//! |---------|-------|--------------|------------------|------------|
//! | `58mm` | 58mm | 384 | 32 | 203 DPI |
//! | `80mm` | 80mm | 576 | 48 | 203 DPI |
//!
//! ## Usage
//!
//! ```
//! use setu::printer::PrinterProfile;
//!
//! let profile = PrinterProfile::by_name("80mm").unwrap();
//! assert_eq!(profile.width_dots, 576);
//! assert_eq!(profile.columns, 48);
//! ```

use serde::Serialize;

/// # Printer Profile
///
/// ## Calculations
///
/// ```text
/// dots_per_mm = dpi / 25.4
/// width_mm = width_dots / dots_per_mm
///
/// For 58mm paper:
///   dots_per_mm = 203 / 25.4 ≈ 8
///   width_mm = 384 / 8 = 48mm printable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrinterProfile {
    /// Short profile name
    pub name: &'static str,

    /// Printable width in dots
    pub width_dots: u16,

    /// Characters per line in the default font
    pub columns: usize,

    /// Resolution in dots per inch
    pub dpi: u16,
}

impl PrinterProfile {
    /// 58mm paper, the default for handheld and Bluetooth receipt printers.
    pub const PAPER_58MM: Self = Self {
        name: "58mm",
        width_dots: 384,
        columns: 32,
        dpi: 203,
    };

    /// 80mm paper, common on counter-top POS printers.
    pub const PAPER_80MM: Self = Self {
        name: "80mm",
        width_dots: 576,
        columns: 48,
        dpi: 203,
    };

    /// All built-in profiles.
    pub const BUILT_IN: &'static [Self] = &[Self::PAPER_58MM, Self::PAPER_80MM];

    /// Look up a built-in profile by name.
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::BUILT_IN.iter().copied().find(|p| p.name == name)
    }

    #[inline]
    pub fn dots_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }

    /// Printable width in millimeters
    #[inline]
    pub fn width_mm(&self) -> f32 {
        self.width_dots as f32 / self.dots_per_mm()
    }

    #[inline]
    pub fn mm_to_dots(&self, mm: f32) -> u16 {
        (mm * self.dots_per_mm()).round() as u16
    }
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self::PAPER_58MM
    }
}

// ============================================================================
// TESTS
// ============================================================================
