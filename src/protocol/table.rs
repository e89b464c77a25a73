//! # Command Table
//!
//! Every opcode the crate knows, as one tagged enum. Parameterless variants
//! are literal byte sequences; the rest are generators whose fields are the
//! command parameters. [`Command::bytes`] is total: every variant has an
//! encoding for every field value it can hold, and out-of-range parameters
//! are clamped by the underlying builder (QR size, barcode width).
//!
//! ```
//! use setu::protocol::table::Command;
//!
//! assert_eq!(Command::BoldOn.bytes(), vec![0x1B, 0x45, 0x01]);
//! assert_eq!(Command::FeedLines(4).bytes(), vec![0x1B, 0x64, 0x04]);
//! assert_eq!(Command::from_name("FULL_CUT"), Some(Command::FullCut));
//! ```

use super::barcode::{barcode1d, qr};
use super::commands;
use super::text::{self, CharSpacing, LineSpacing, TextSize};

pub use super::barcode::qr::QrErrorLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Initialize and reset
    Initialize,
    Reset,

    // Emphasis
    BoldOn,
    BoldOff,
    UnderlineOn,
    UnderlineOff,
    ItalicOn,
    ItalicOff,
    ReverseOn,
    ReverseOff,
    RotateOn,
    RotateOff,
    DarkPrint,
    LightPrint,

    // Size (GS !)
    NormalSize,
    DoubleHeight,
    DoubleWidth,
    DoubleSize,

    // Size (ESC !)
    FontSmall,
    FontMedium,
    FontLarge,
    FontXLarge,

    AlignLeft,
    AlignCenter,
    AlignRight,

    LineSpacingDefault,
    LineSpacingTight,
    LineSpacingLoose,
    SetLineSpacing(u8),

    CharSpacingDefault,
    CharSpacingTight,
    CharSpacingWide,

    // Paper
    Newline,
    FeedLines(u8),
    FeedPaper,
    FullCut,
    PartialCut,
    FeedAndCut,
    FeedAndPartialCut,
    FeedLinesAndCut { lines: u8, partial: bool },

    // Peripherals
    Beep,
    OpenDrawer,

    // Barcodes
    BarcodeHeight(u8),
    BarcodeWidth(u8),
    QrModel,
    QrSize(u8),
    QrErrorCorrection(QrErrorLevel),
    QrPrint,
}

impl Command {
    /// All parameterless (literal) commands, in table order.
    pub const LITERALS: &'static [Command] = &[
        Command::Initialize,
        Command::Reset,
        Command::BoldOn,
        Command::BoldOff,
        Command::UnderlineOn,
        Command::UnderlineOff,
        Command::ItalicOn,
        Command::ItalicOff,
        Command::ReverseOn,
        Command::ReverseOff,
        Command::RotateOn,
        Command::RotateOff,
        Command::DarkPrint,
        Command::LightPrint,
        Command::NormalSize,
        Command::DoubleHeight,
        Command::DoubleWidth,
        Command::DoubleSize,
        Command::FontSmall,
        Command::FontMedium,
        Command::FontLarge,
        Command::FontXLarge,
        Command::AlignLeft,
        Command::AlignCenter,
        Command::AlignRight,
        Command::LineSpacingDefault,
        Command::LineSpacingTight,
        Command::LineSpacingLoose,
        Command::CharSpacingDefault,
        Command::CharSpacingTight,
        Command::CharSpacingWide,
        Command::Newline,
        Command::FeedPaper,
        Command::FullCut,
        Command::PartialCut,
        Command::FeedAndCut,
        Command::FeedAndPartialCut,
        Command::Beep,
        Command::OpenDrawer,
        Command::QrModel,
        Command::QrPrint,
    ];

    /// Encode the command.
    pub fn bytes(&self) -> Vec<u8> {
        match *self {
            Command::Initialize => commands::init(),
            Command::Reset => commands::reset_alternate(),
            Command::BoldOn => text::bold_on(),
            Command::BoldOff => text::bold_off(),
            Command::UnderlineOn => text::underline_on(),
            Command::UnderlineOff => text::underline_off(),
            Command::ItalicOn => text::italic_on(),
            Command::ItalicOff => text::italic_off(),
            Command::ReverseOn => text::reverse(true),
            Command::ReverseOff => text::reverse(false),
            Command::RotateOn => text::rotate(true),
            Command::RotateOff => text::rotate(false),
            Command::DarkPrint => text::density(true),
            Command::LightPrint => text::density(false),
            Command::NormalSize => text::size(TextSize::Normal),
            Command::DoubleHeight => text::size(TextSize::DoubleHeight),
            Command::DoubleWidth => text::size(TextSize::DoubleWidth),
            Command::DoubleSize => text::size(TextSize::Double),
            Command::FontSmall => text::size(TextSize::Small),
            Command::FontMedium => text::size(TextSize::Medium),
            Command::FontLarge => text::size(TextSize::Large),
            Command::FontXLarge => text::size(TextSize::XLarge),
            Command::AlignLeft => text::align_left(),
            Command::AlignCenter => text::align_center(),
            Command::AlignRight => text::align_right(),
            Command::LineSpacingDefault => text::line_spacing(LineSpacing::Default),
            Command::LineSpacingTight => text::line_spacing(LineSpacing::Tight),
            Command::LineSpacingLoose => text::line_spacing(LineSpacing::Loose),
            Command::SetLineSpacing(n) => text::set_line_spacing(n),
            Command::CharSpacingDefault => text::char_spacing(CharSpacing::Default),
            Command::CharSpacingTight => text::char_spacing(CharSpacing::Tight),
            Command::CharSpacingWide => text::char_spacing(CharSpacing::Wide),
            Command::Newline => commands::newline(),
            Command::FeedLines(n) => commands::feed_lines(n),
            Command::FeedPaper => commands::feed_paper(),
            Command::FullCut => commands::cut_full(),
            Command::PartialCut => commands::cut_partial(),
            Command::FeedAndCut => commands::cut_full_feed(),
            Command::FeedAndPartialCut => commands::cut_partial_feed(),
            Command::FeedLinesAndCut { lines, partial } => commands::feed_and_cut(lines, partial),
            Command::Beep => commands::beep(),
            Command::OpenDrawer => commands::open_drawer(),
            Command::BarcodeHeight(h) => barcode1d::set_height(h),
            Command::BarcodeWidth(w) => barcode1d::set_width(w),
            Command::QrModel => qr::set_model(),
            Command::QrSize(n) => qr::set_cell_size(n),
            Command::QrErrorCorrection(level) => qr::set_error_correction(level),
            Command::QrPrint => qr::print(),
        }
    }

    /// Symbolic opcode name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Initialize => "INITIALIZE",
            Command::Reset => "RESET",
            Command::BoldOn => "BOLD_ON",
            Command::BoldOff => "BOLD_OFF",
            Command::UnderlineOn => "UNDERLINE_ON",
            Command::UnderlineOff => "UNDERLINE_OFF",
            Command::ItalicOn => "ITALIC_ON",
            Command::ItalicOff => "ITALIC_OFF",
            Command::ReverseOn => "REVERSE_ON",
            Command::ReverseOff => "REVERSE_OFF",
            Command::RotateOn => "ROTATE_ON",
            Command::RotateOff => "ROTATE_OFF",
            Command::DarkPrint => "DARK_PRINT",
            Command::LightPrint => "LIGHT_PRINT",
            Command::NormalSize => "NORMAL_SIZE",
            Command::DoubleHeight => "DOUBLE_HEIGHT",
            Command::DoubleWidth => "DOUBLE_WIDTH",
            Command::DoubleSize => "DOUBLE_SIZE",
            Command::FontSmall => "FONT_SMALL",
            Command::FontMedium => "FONT_MEDIUM",
            Command::FontLarge => "FONT_LARGE",
            Command::FontXLarge => "FONT_XLARGE",
            Command::AlignLeft => "ALIGN_LEFT",
            Command::AlignCenter => "ALIGN_CENTER",
            Command::AlignRight => "ALIGN_RIGHT",
            Command::LineSpacingDefault => "LINE_SPACING_DEFAULT",
            Command::LineSpacingTight => "LINE_SPACING_TIGHT",
            Command::LineSpacingLoose => "LINE_SPACING_LOOSE",
            Command::SetLineSpacing(_) => "SET_LINE_SPACING",
            Command::CharSpacingDefault => "CHAR_SPACING_DEFAULT",
            Command::CharSpacingTight => "CHAR_SPACING_TIGHT",
            Command::CharSpacingWide => "CHAR_SPACING_WIDE",
            Command::Newline => "NEWLINE",
            Command::FeedLines(_) => "FEED_LINE",
            Command::FeedPaper => "FEED_PAPER",
            Command::FullCut => "FULL_CUT",
            Command::PartialCut => "PARTIAL_CUT",
            Command::FeedAndCut => "FEED_AND_CUT",
            Command::FeedAndPartialCut => "FEED_AND_PARTIAL_CUT",
            Command::FeedLinesAndCut { .. } => "FEED_LINES_AND_CUT",
            Command::Beep => "BEEP",
            Command::OpenDrawer => "OPEN_DRAWER",
            Command::BarcodeHeight(_) => "BARCODE_HEIGHT",
            Command::BarcodeWidth(_) => "BARCODE_WIDTH",
            Command::QrModel => "QR_CODE_MODEL",
            Command::QrSize(_) => "QR_CODE_SIZE",
            Command::QrErrorCorrection(_) => "QR_CODE_ERROR_CORRECTION",
            Command::QrPrint => "QR_CODE_PRINT",
        }
    }

    /// Look up a literal command by its symbolic name.
    ///
    /// Generators need parameters and can't be resolved by name alone.
    pub fn from_name(name: &str) -> Option<Command> {
        Self::LITERALS.iter().copied().find(|c| c.name() == name)
    }
}

// ============================================================================
// TESTS
// ============================================================================
