//! # Command Encoder
//!
//! A chainable builder that assembles an ESC/POS byte stream. Every
//! operation appends bytes and hands the builder back; nothing depends on
//! earlier calls except the buffer contents.
//!
//! ```
//! use setu::encoder::{CommandEncoder, CutStyle, LineStyle};
//! use setu::protocol::text::{Alignment, TextSize};
//!
//! let bytes = CommandEncoder::new()
//!     .reset()
//!     .header("Chai Point", 32, TextSize::Double)
//!     .formatted_line("Masala chai", "40.00", 32, ' ', false, false)
//!     .formatted_line("Total", "40.00", 32, '.', true, true)
//!     .line(LineStyle::Dotted, 32)
//!     .align(Alignment::Center)
//!     .text("Thank you!")
//!     .feed(3)
//!     .cut(CutStyle::Partial)
//!     .into_bytes();
//!
//! assert_eq!(&bytes[..3], &[0x1B, 0x1B, 0x40]);
//! ```
//!
//! ## Optional Commands
//!
//! Italic, beeper, cash drawer and native QR are emitted only when the
//! encoder's [`Capabilities`] allow them. A QR code the printer cannot
//! take natively is drawn as a raster image; one that can't be encoded at
//! all is replaced by centered text `QR: <first 30 chars>...`. Either way
//! the stream stays well-formed.

pub mod layout;
pub mod qr;
pub mod upi;

pub use layout::LineStyle;

use crate::printer::Capabilities;
use crate::protocol::barcode::barcode1d;
use crate::protocol::barcode::qr::QrErrorLevel;
use crate::protocol::commands::{self, LF};
use crate::protocol::table::Command;
use crate::protocol::text::{self, Alignment, CharSpacing, LineSpacing, TextSize};

/// Paper cut styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutStyle {
    /// GS V 0
    #[default]
    Full,
    /// GS V 1
    Partial,
    /// ESC d 3, GS V 0
    FeedAndCut,
    /// ESC d 3, GS V 1
    FeedAndPartialCut,
}

impl CutStyle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "full" => Some(Self::Full),
            "partial" => Some(Self::Partial),
            "feedAndCut" | "feed_and_cut" => Some(Self::FeedAndCut),
            "feedAndPartialCut" | "feed_and_partial_cut" => Some(Self::FeedAndPartialCut),
            _ => None,
        }
    }
}

/// Default QR module size in dots
pub const DEFAULT_QR_SIZE: u8 = 6;

/// ESC/POS byte stream builder.
///
/// Owns its buffer exclusively; finalize with [`into_bytes`](Self::into_bytes).
#[derive(Debug, Clone, Default)]
pub struct CommandEncoder {
    buf: Vec<u8>,
    capabilities: Capabilities,
}

impl CommandEncoder {
    /// Empty encoder assuming a fully featured printer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty encoder that only emits commands `capabilities` allows.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            buf: Vec::with_capacity(1024),
            capabilities,
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    // === Buffer ===

    /// Append raw bytes verbatim.
    pub fn add(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append a command from the command table.
    pub fn command(self, command: Command) -> Self {
        self.add(&command.bytes())
    }

    /// Bytes accumulated so far
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drop everything accumulated so far.
    pub fn clear(mut self) -> Self {
        self.buf.clear();
        self
    }

    /// Finalize into the raw command stream.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // === Initialization ===

    /// Reset the printer (ESC ESC @). First call of every job.
    ///
    /// Use [`Command::Initialize`] for a bare `ESC @`.
    pub fn reset(self) -> Self {
        self.command(Command::Reset)
    }

    // === Text Output ===

    /// Append the UTF-8 bytes of `s` verbatim. Control bytes are not escaped.
    pub fn text(mut self, s: impl AsRef<str>) -> Self {
        self.buf.extend_from_slice(s.as_ref().as_bytes());
        self
    }

    /// Append `n` line feeds.
    pub fn newline(mut self, n: usize) -> Self {
        self.buf.extend(std::iter::repeat_n(LF, n));
        self
    }

    /// Centered line of text.
    pub fn center_text(self, s: impl AsRef<str>) -> Self {
        self.align(Alignment::Center).text(s).newline(1)
    }

    /// Right-aligned line of text.
    pub fn right_text(self, s: impl AsRef<str>) -> Self {
        self.align(Alignment::Right).text(s).newline(1)
    }

    // === Text Style ===

    pub fn bold(self, on: bool) -> Self {
        self.add(&if on { text::bold_on() } else { text::bold_off() })
    }

    pub fn underline(self, on: bool) -> Self {
        self.add(&if on {
            text::underline_on()
        } else {
            text::underline_off()
        })
    }

    /// Italic on/off. A no-op on printers without italic support.
    pub fn italic(self, on: bool) -> Self {
        if !self.capabilities.italic {
            tracing::debug!("printer lacks italic, skipping");
            return self;
        }
        self.add(&if on { text::italic_on() } else { text::italic_off() })
    }

    pub fn reverse(self, on: bool) -> Self {
        self.add(&text::reverse(on))
    }

    pub fn rotate(self, on: bool) -> Self {
        self.add(&text::rotate(on))
    }

    /// Dark (double-strike) or light print.
    pub fn density(self, dark: bool) -> Self {
        self.add(&text::density(dark))
    }

    pub fn size(self, size: TextSize) -> Self {
        self.add(&text::size(size))
    }

    /// Size by name; unknown names select normal size.
    pub fn size_named(self, name: &str) -> Self {
        self.size(TextSize::from_name(name).unwrap_or_default())
    }

    pub fn align(self, alignment: Alignment) -> Self {
        self.add(&text::align(alignment))
    }

    /// Alignment by name; unknown names align left.
    pub fn align_named(self, name: &str) -> Self {
        self.align(Alignment::from_name(name).unwrap_or_default())
    }

    pub fn line_spacing(self, spacing: LineSpacing) -> Self {
        self.add(&text::line_spacing(spacing))
    }

    /// Custom line spacing in motion units. Values outside 0..=255 are
    /// ignored.
    pub fn line_spacing_units(self, n: i64) -> Self {
        match LineSpacing::from_units(n) {
            Some(spacing) => self.line_spacing(spacing),
            None => self,
        }
    }

    pub fn char_spacing(self, spacing: CharSpacing) -> Self {
        self.add(&text::char_spacing(spacing))
    }

    // === Layout ===

    /// `width` copies of the style's glyph, then a newline.
    pub fn line(self, style: LineStyle, width: usize) -> Self {
        self.separator(width, style.glyph())
    }

    /// `width` copies of `glyph`, then a newline.
    pub fn separator(self, width: usize, glyph: char) -> Self {
        let rule: String = std::iter::repeat_n(glyph, width).collect();
        self.text(rule).newline(1)
    }

    /// Label/value row. See [`layout::formatted_segments`] for column math.
    ///
    /// The padded value is sent between `ESC a 2` and `ESC a 0`, inside its
    /// own bold toggle:
    ///
    /// ```text
    /// [bold on] label [bold off] [bold on] ESC a 2 value ESC a 0 [bold off] LF
    /// ```
    pub fn formatted_line(
        self,
        label: &str,
        value: &str,
        width: usize,
        pad: char,
        bold_label: bool,
        bold_value: bool,
    ) -> Self {
        let (label_seg, value_seg) = layout::formatted_segments(label, value, width, pad);
        let enc = self.styled(&label_seg, bold_label);
        let enc = if bold_value { enc.bold(true) } else { enc };
        let enc = enc.right_segment(&value_seg);
        let enc = if bold_value { enc.bold(false) } else { enc };
        enc.newline(1)
    }

    /// Two-column row, left column `left_width` wide (default
    /// `floor(width × 0.6)`), right column right-aligned.
    pub fn two_columns(
        self,
        left: &str,
        right: &str,
        width: usize,
        left_width: Option<usize>,
    ) -> Self {
        let (left_seg, right_seg) = layout::column_segments(left, right, width, left_width);
        self.text(left_seg).right_segment(&right_seg).newline(1)
    }

    /// Right-aligned segment; alignment returns to left afterwards.
    fn right_segment(self, segment: &str) -> Self {
        self.align(Alignment::Right)
            .text(segment)
            .align(Alignment::Left)
    }

    fn styled(self, segment: &str, bold: bool) -> Self {
        if bold {
            self.bold(true).text(segment).bold(false)
        } else {
            self.text(segment)
        }
    }

    /// Centered, bold, upper-cased title followed by a double rule.
    pub fn header(self, title: &str, width: usize, size: TextSize) -> Self {
        self.align(Alignment::Center)
            .size(size)
            .bold(true)
            .text(title.to_uppercase())
            .newline(1)
            .size(TextSize::Normal)
            .bold(false)
            .line(LineStyle::Double, width)
    }

    /// Centered, bold, double-height title followed by a single rule.
    pub fn subheader(self, title: &str, width: usize) -> Self {
        self.align(Alignment::Center)
            .size(TextSize::DoubleHeight)
            .bold(true)
            .text(title)
            .newline(1)
            .size(TextSize::Normal)
            .bold(false)
            .line(LineStyle::Single, width)
    }

    // === Graphics ===

    /// Embed a raster command (or any pre-built bytes) verbatim.
    pub fn add_image(self, image: &[u8]) -> Self {
        self.add(image)
    }

    // === Paper Control ===

    /// Feed `n` lines. One line is a plain LF; more use `ESC d n`, or
    /// repeated LFs past 255.
    pub fn feed(self, n: usize) -> Self {
        match n {
            0 => self,
            1 => self.newline(1),
            _ => match u8::try_from(n) {
                Ok(lines) => self.add(&commands::feed_lines(lines)),
                Err(_) => self.newline(n),
            },
        }
    }

    pub fn cut(self, style: CutStyle) -> Self {
        let cmd = match style {
            CutStyle::Full => commands::cut_full(),
            CutStyle::Partial => commands::cut_partial(),
            CutStyle::FeedAndCut => commands::cut_full_feed(),
            CutStyle::FeedAndPartialCut => commands::cut_partial_feed(),
        };
        self.add(&cmd)
    }

    /// Cut by name; unknown names emit nothing.
    pub fn cut_named(self, name: &str) -> Self {
        match CutStyle::from_name(name) {
            Some(style) => self.cut(style),
            None => {
                tracing::debug!(style = name, "unknown cut style, skipping");
                self
            }
        }
    }

    // === Peripherals ===

    pub fn beep(self) -> Self {
        if !self.capabilities.beeper {
            tracing::debug!("printer lacks beeper, skipping");
            return self;
        }
        self.add(&commands::beep())
    }

    pub fn open_drawer(self) -> Self {
        if !self.capabilities.cash_drawer {
            tracing::debug!("printer lacks cash drawer, skipping");
            return self;
        }
        self.add(&commands::open_drawer())
    }

    // === Barcodes ===

    /// CODE39 barcode. Lowercase is upper-cased; data outside the CODE39
    /// alphabet prints as centered text instead.
    pub fn barcode_code39(self, data: &str, height: u8, width: u8) -> Self {
        let upper = data.to_ascii_uppercase();
        if upper.is_empty() || !upper.chars().all(barcode1d::is_code39_char) {
            tracing::warn!(data, "not encodable as CODE39, printing as text");
            return self
                .align(Alignment::Center)
                .text(format!("BARCODE: {}", data))
                .newline(1);
        }
        self.add(&barcode1d::set_height(height))
            .add(&barcode1d::set_width(width))
            .add(&barcode1d::code39(upper.as_bytes()))
    }

    /// QR code, `size` dots per module (clamped to 1..=16).
    ///
    /// Emits center, model, size, error correction, data, print, left, LF.
    /// Payloads that can't be encoded become the `QR: ...` text fallback.
    pub fn qr_code(self, data: &str, size: u8, level: QrErrorLevel) -> Self {
        if self.capabilities.native_qr {
            if let Some(cmd) = qr::native_sequence(data, size, level) {
                return self.add(&cmd);
            }
        } else if let Some(raster) =
            qr::raster_symbol(data, size, level, self.capabilities.print_width_dots)
        {
            return self
                .align(Alignment::Center)
                .add_image(&raster.to_command())
                .align(Alignment::Left)
                .newline(1);
        }

        tracing::warn!(
            data_len = data.len(),
            "QR payload not encodable, printing text fallback"
        );
        self.align(Alignment::Center)
            .text(qr::fallback_label(data))
            .newline(1)
    }

    /// "Scan to Pay" caption and a UPI payment QR code (size 6, level H).
    pub fn upi_qr(self, payee: &str, amount: Option<&str>, name: Option<&str>) -> Self {
        let link = upi::pay_link(payee, amount, name);
        self.align(Alignment::Center)
            .text("Scan to Pay")
            .newline(1)
            .qr_code(&link, DEFAULT_QR_SIZE, QrErrorLevel::H)
            .newline(1)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_text_is_verbatim() {
        let bytes = CommandEncoder::new().text("a\x1Bb€").into_bytes();
        assert_eq!(bytes, "a\x1Bb€".as_bytes());
    }

    #[test]
    fn test_newline_count() {
        assert_eq!(CommandEncoder::new().newline(3).into_bytes(), vec![LF; 3]);
        assert!(CommandEncoder::new().newline(0).is_empty());
    }

    #[test]
    fn test_toggles() {
        let bytes = CommandEncoder::new()
            .bold(true)
            .underline(true)
            .italic(true)
            .italic(false)
            .into_bytes();
        assert_eq!(
            bytes,
            vec![0x1B, 0x45, 1, 0x1B, 0x2D, 1, 0x1B, 0x34, 0x1B, 0x35]
        );
    }

    #[test]
    fn test_italic_skipped_without_capability() {
        let caps = Capabilities {
            italic: false,
            ..Capabilities::default()
        };
        let enc = CommandEncoder::with_capabilities(caps).italic(true);
        assert!(enc.is_empty());
    }

    #[test]
    fn test_size_and_align_fallbacks() {
        assert_eq!(
            CommandEncoder::new().size_named("gigantic").into_bytes(),
            vec![0x1D, 0x21, 0x00]
        );
        assert_eq!(
            CommandEncoder::new().align_named("justify").into_bytes(),
            vec![0x1B, 0x61, 0x00]
        );
        assert_eq!(
            CommandEncoder::new().size_named("xlarge").into_bytes(),
            vec![0x1B, 0x21, 0x11]
        );
    }

    #[test]
    fn test_line_spacing_range() {
        assert_eq!(
            CommandEncoder::new().line_spacing_units(40).into_bytes(),
            vec![0x1B, 0x33, 40]
        );
        assert!(CommandEncoder::new().line_spacing_units(256).is_empty());
        assert!(CommandEncoder::new().line_spacing_units(-3).is_empty());
        assert_eq!(
            CommandEncoder::new().line_spacing(LineSpacing::Default).into_bytes(),
            vec![0x1B, 0x32]
        );
    }

    #[test]
    fn test_line_styles() {
        assert_eq!(
            CommandEncoder::new().line(LineStyle::Star, 4).into_bytes(),
            b"****\n".to_vec()
        );
        assert_eq!(
            CommandEncoder::new().line(LineStyle::Thick, 2).into_bytes(),
            "██\n".as_bytes().to_vec()
        );
    }

    #[test]
    fn test_formatted_line_bold_segments() {
        let bytes = CommandEncoder::new()
            .formatted_line("Tax", "1.00", 10, ' ', true, false)
            .into_bytes();
        let mut expected = vec![0x1B, 0x45, 1];
        expected.extend(b"Tax   ");
        expected.extend([0x1B, 0x45, 0, 0x1B, 0x61, 2]);
        expected.extend(b"1.00");
        expected.extend([0x1B, 0x61, 0, LF]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_formatted_line_bold_value_only() {
        let bytes = CommandEncoder::new()
            .formatted_line("Tax", "1", 10, '.', false, true)
            .into_bytes();
        let mut expected = b"Tax.. ".to_vec();
        expected.extend([0x1B, 0x45, 1, 0x1B, 0x61, 2]);
        expected.extend(b"   1");
        expected.extend([0x1B, 0x61, 0, 0x1B, 0x45, 0, LF]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_two_columns() {
        let bytes = CommandEncoder::new()
            .two_columns("Coffee", "3.50", 16, None)
            .into_bytes();
        let mut expected = b"Coffee   ".to_vec();
        expected.extend([0x1B, 0x61, 2]);
        expected.extend(b"   3.50");
        expected.extend([0x1B, 0x61, 0, LF]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_two_columns_zero_left_width_uses_default() {
        let default = CommandEncoder::new()
            .two_columns("Coffee", "3.50", 16, None)
            .into_bytes();
        let zero = CommandEncoder::new()
            .two_columns("Coffee", "3.50", 16, Some(0))
            .into_bytes();
        assert_eq!(zero, default);
    }

    #[test]
    fn test_reset_emits_alternate_sequence() {
        let bytes = CommandEncoder::new().reset().into_bytes();
        assert_eq!(bytes, vec![0x1B, 0x1B, 0x40]);
        assert_eq!(bytes, Command::Reset.bytes());
        assert_ne!(bytes, Command::Initialize.bytes());
    }

    #[test]
    fn test_header_sequence() {
        let bytes = CommandEncoder::new()
            .header("menu", 4, TextSize::Double)
            .into_bytes();
        let mut expected = vec![0x1B, 0x61, 1, 0x1D, 0x21, 0x11, 0x1B, 0x45, 1];
        expected.extend(b"MENU\n");
        expected.extend([0x1D, 0x21, 0x00, 0x1B, 0x45, 0]);
        expected.extend(b"====\n");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_subheader_keeps_case() {
        let bytes = CommandEncoder::new().subheader("Items", 3).into_bytes();
        let mut expected = vec![0x1B, 0x61, 1, 0x1D, 0x21, 0x01, 0x1B, 0x45, 1];
        expected.extend(b"Items\n");
        expected.extend([0x1D, 0x21, 0x00, 0x1B, 0x45, 0]);
        expected.extend(b"---\n");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_feed() {
        assert_eq!(CommandEncoder::new().feed(1).into_bytes(), vec![LF]);
        assert_eq!(
            CommandEncoder::new().feed(4).into_bytes(),
            vec![0x1B, 0x64, 4]
        );
        assert_eq!(CommandEncoder::new().feed(300).len(), 300);
        assert!(CommandEncoder::new().feed(0).is_empty());
    }

    #[test]
    fn test_cut_styles() {
        assert_eq!(
            CommandEncoder::new().cut(CutStyle::Full).into_bytes(),
            vec![0x1D, 0x56, 0]
        );
        assert_eq!(
            CommandEncoder::new().cut_named("feedAndCut").into_bytes(),
            vec![0x1B, 0x64, 3, 0x1D, 0x56, 0]
        );
        assert!(CommandEncoder::new().cut_named("guillotine").is_empty());
    }

    #[test]
    fn test_peripherals_respect_capabilities() {
        let caps = Capabilities {
            beeper: false,
            cash_drawer: false,
            ..Capabilities::default()
        };
        let enc = CommandEncoder::with_capabilities(caps).beep().open_drawer();
        assert!(enc.is_empty());

        let bytes = CommandEncoder::new().beep().open_drawer().into_bytes();
        assert_eq!(bytes, vec![0x1B, 0x42, 1, 1, 0x1B, 0x70, 0, 0x60, 0x78]);
    }

    #[test]
    fn test_qr_native() {
        let bytes = CommandEncoder::new()
            .qr_code("hi", 40, QrErrorLevel::Q)
            .into_bytes();
        assert!(bytes.starts_with(&[0x1B, 0x61, 0x01]));
        assert!(contains(&bytes, &[0x31, 0x43, 16]));
        assert!(contains(&bytes, &[0x31, 0x45, 50]));
        assert!(bytes.ends_with(&[0x1B, 0x61, 0x00, LF]));
    }

    #[test]
    fn test_qr_oversize_falls_back_to_text() {
        let data = format!("{}{}", "0123456789".repeat(3), "z".repeat(70_000));
        let bytes = CommandEncoder::new()
            .qr_code(&data, 6, QrErrorLevel::M)
            .into_bytes();
        let expected_text = b"QR: 012345678901234567890123456789...";
        assert!(contains(&bytes, expected_text));
        assert!(!contains(&bytes, &[0x31, 0x50, 0x30]));
        assert_eq!(*bytes.last().unwrap(), LF);
    }

    #[test]
    fn test_qr_raster_when_not_native() {
        let caps = Capabilities {
            native_qr: false,
            ..Capabilities::default()
        };
        let bytes = CommandEncoder::with_capabilities(caps)
            .qr_code("hello", 4, QrErrorLevel::M)
            .into_bytes();
        // center, then GS v 0 with 84 dots = 11 bytes per row, 84 rows
        assert_eq!(&bytes[..3], &[0x1B, 0x61, 0x01]);
        assert_eq!(&bytes[3..11], &[0x1D, 0x76, 0x30, 0, 11, 0, 84, 0]);
        assert!(!contains(&bytes, &[0x1D, 0x28, 0x6B]));
    }

    #[test]
    fn test_upi_qr_payload() {
        let bytes = CommandEncoder::new()
            .upi_qr("shop@upi", Some("10"), None)
            .into_bytes();
        assert!(contains(&bytes, b"Scan to Pay\n"));
        assert!(contains(&bytes, b"upi://pay?pa=shop%40upi&am=10&cu=INR"));
        assert!(contains(&bytes, &[0x31, 0x45, 51]));
        assert!(contains(&bytes, &[0x31, 0x43, 6]));
    }

    #[test]
    fn test_barcode_code39() {
        let bytes = CommandEncoder::new().barcode_code39("ab-12", 60, 3).into_bytes();
        let mut expected = vec![0x1D, 0x68, 60, 0x1D, 0x77, 3, 0x1D, 0x6B, 4];
        expected.extend(b"AB-12");
        expected.push(0);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_barcode_invalid_falls_back() {
        let bytes = CommandEncoder::new().barcode_code39("a_b", 60, 3).into_bytes();
        assert!(contains(&bytes, b"BARCODE: a_b\n"));
        assert!(!contains(&bytes, &[0x1D, 0x6B]));
    }

    #[test]
    fn test_clear_and_len() {
        let enc = CommandEncoder::new().text("abc");
        assert_eq!(enc.len(), 3);
        assert_eq!(enc.buffer(), b"abc");
        let enc = enc.clear();
        assert!(enc.is_empty());
    }

    #[test]
    fn test_command_table_append() {
        let bytes = CommandEncoder::new()
            .command(Command::ReverseOn)
            .command(Command::FeedPaper)
            .into_bytes();
        assert_eq!(bytes, vec![0x1D, 0x42, 1, 0x1B, 0x4A, 0x40]);
    }
}
