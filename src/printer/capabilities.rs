//! # Capability Descriptor
//!
//! ESC/POS printers never report which optional commands they understand.
//! Callers that know their hardware describe it here and the encoder
//! adapts: unsupported italic, beeper and drawer commands are skipped, and
//! QR codes are drawn as raster images when the firmware lacks `GS ( k`.
//!
//! ```
//! use setu::printer::Capabilities;
//!
//! let caps: Capabilities = serde_json::from_str(r#"{ "native_qr": false }"#).unwrap();
//! assert!(!caps.native_qr);
//! assert!(caps.beeper);
//! assert_eq!(caps.print_width_dots, 384);
//! ```

use serde::{Deserialize, Serialize};

use super::config::PrinterProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Firmware implements the `GS ( k` QR symbol commands
    pub native_qr: bool,
    /// Firmware implements `ESC 4` / `ESC 5`
    pub italic: bool,
    pub beeper: bool,
    pub cash_drawer: bool,
    /// Width available to raster fallbacks
    pub print_width_dots: u16,
}

impl Capabilities {
    /// Everything supported, sized for `profile`.
    pub fn for_profile(profile: &PrinterProfile) -> Self {
        Self {
            print_width_dots: profile.width_dots,
            ..Self::default()
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            native_qr: true,
            italic: true,
            beeper: true,
            cash_drawer: true,
            print_width_dots: PrinterProfile::PAPER_58MM.width_dots,
        }
    }
}
