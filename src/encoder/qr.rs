//! QR code emission: native `GS ( k` sequence, raster fallback for firmware
//! without QR support, and the plain-text label used when neither works.

use qrcode::{Color, EcLevel, QrCode};

use crate::protocol::barcode::qr::{self, QrErrorLevel};
use crate::protocol::text;
use crate::render::RasterImage;

/// Characters of payload shown in the text fallback
pub const FALLBACK_PREVIEW_CHARS: usize = 30;

/// Full native sequence: center, model, size, error correction, store,
/// print, back to left, newline.
///
/// `None` if the payload can't be length-encoded; nothing partial escapes.
pub fn native_sequence(data: &str, size: u8, level: QrErrorLevel) -> Option<Vec<u8>> {
    let store = qr::store_data(data.as_bytes())?;

    let mut cmd = Vec::with_capacity(store.len() + 48);
    cmd.extend(text::align_center());
    cmd.extend(qr::set_model());
    cmd.extend(qr::set_cell_size(size));
    cmd.extend(qr::set_error_correction(level));
    cmd.extend(store);
    cmd.extend(qr::print());
    cmd.extend(text::align_left());
    cmd.push(crate::protocol::commands::LF);
    Some(cmd)
}

/// Draw the symbol as a raster image, `size` dots per module, shrinking
/// the module size until it fits `max_width`.
///
/// `None` if the data doesn't fit any QR version or even 1-dot modules are
/// too wide.
pub fn raster_symbol(
    data: &str,
    size: u8,
    level: QrErrorLevel,
    max_width: u16,
) -> Option<RasterImage> {
    let ec = match level {
        QrErrorLevel::L => EcLevel::L,
        QrErrorLevel::M => EcLevel::M,
        QrErrorLevel::Q => EcLevel::Q,
        QrErrorLevel::H => EcLevel::H,
    };
    let code = QrCode::with_error_correction_level(data.as_bytes(), ec).ok()?;
    let modules = code.width() as u32;
    let colors = code.to_colors();

    let mut cell = size.clamp(qr::MIN_CELL_SIZE, qr::MAX_CELL_SIZE) as u32;
    while cell > 1 && modules * cell > max_width as u32 {
        cell -= 1;
    }
    if modules * cell > max_width as u32 {
        return None;
    }

    let side = modules * cell;
    RasterImage::from_fn(side, side, |x, y| {
        let idx = (y / cell * modules + x / cell) as usize;
        colors[idx] == Color::Dark
    })
    .ok()
}

/// `"QR: " + first 30 chars + "..." if truncated`
pub fn fallback_label(data: &str) -> String {
    let preview: String = data.chars().take(FALLBACK_PREVIEW_CHARS).collect();
    let ellipsis = if data.chars().count() > FALLBACK_PREVIEW_CHARS {
        "..."
    } else {
        ""
    };
    format!("QR: {}{}", preview, ellipsis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_sequence_layout() {
        let cmd = native_sequence("AB", 6, QrErrorLevel::M).unwrap();
        let expected: Vec<u8> = [
            &[0x1B, 0x61, 0x01][..],
            &[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00],
            &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 6],
            &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 49],
            &[0x1D, 0x28, 0x6B, 5, 0, 0x31, 0x50, 0x30, b'A', b'B'],
            &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30],
            &[0x1B, 0x61, 0x00],
            &[0x0A],
        ]
        .concat();
        assert_eq!(cmd, expected);
    }

    #[test]
    fn test_native_sequence_rejects_oversize() {
        let data = "x".repeat(qr::MAX_DATA_LEN + 1);
        assert!(native_sequence(&data, 6, QrErrorLevel::M).is_none());
    }

    #[test]
    fn test_raster_symbol_square() {
        let raster = raster_symbol("hello", 4, QrErrorLevel::M, 384).unwrap();
        // Version 1 is 21 modules
        assert_eq!(raster.width(), 21 * 4);
        assert_eq!(raster.height(), 21 * 4);
        // Finder pattern corner is dark
        assert!(raster.dot(0, 0));
    }

    #[test]
    fn test_raster_symbol_shrinks_to_fit() {
        let raster = raster_symbol("hello", 16, QrErrorLevel::M, 100).unwrap();
        assert!(raster.width() <= 100);
        assert_eq!(raster.width() % 21, 0);
    }

    #[test]
    fn test_raster_symbol_too_wide() {
        assert!(raster_symbol("hello", 1, QrErrorLevel::M, 10).is_none());
    }

    #[test]
    fn test_fallback_label() {
        assert_eq!(fallback_label("short"), "QR: short");
        let long = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(fallback_label(long), "QR: abcdefghijklmnopqrstuvwxyz0123...");
    }
}
