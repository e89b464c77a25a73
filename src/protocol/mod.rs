//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders for the ESC/POS protocol spoken by most
//! thermal receipt printers (EPSON TM series and the many 58mm/80mm clones).
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, feed, cut, beeper, drawer)
//! - [`text`]: Text styling (alignment, size, bold, underline, spacing)
//! - [`barcode`]: CODE39 and QR codes
//! - [`graphics`]: Raster bit image (`GS v 0`)
//! - [`table`]: Every opcode as a single [`Command`](table::Command) enum
//!
//! ## Usage Example
//!
//! ```
//! use setu::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align_center());
//! data.extend(text::bold_on());
//! data.extend(b"RECEIPT\n");
//! data.extend(text::bold_off());
//! data.extend(commands::cut_full_feed());
//! ```

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod table;
pub mod text;
