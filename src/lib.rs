//! # Setu - ESC/POS Encoding for Thermal Receipt Printers
//!
//! Setu turns print content (plain text, a bitmap, or the first page of a
//! PDF) into a byte-exact ESC/POS command stream and hands it to a printer
//! transport. It provides:
//!
//! - **Protocol implementation**: ESC/POS opcode builders and a symbolic
//!   command table
//! - **Rasterization**: aspect-preserving resize, luminance threshold and
//!   `GS v 0` raster packing
//! - **Command encoder**: a chainable builder for receipts, with QR codes,
//!   CODE39 barcodes and UPI payment codes
//! - **Transport**: base64 payloads, an async transport trait, and a
//!   character-device backend
//!
//! ## Quick Start
//!
//! ```
//! use setu::encoder::{CommandEncoder, CutStyle};
//! use setu::protocol::barcode::qr::QrErrorLevel;
//! use setu::protocol::text::Alignment;
//!
//! let receipt = CommandEncoder::new()
//!     .reset()
//!     .align(Alignment::Center)
//!     .bold(true)
//!     .text("ORDER #1042")
//!     .bold(false)
//!     .newline(2)
//!     .two_columns("Filter coffee", "30.00", 32, None)
//!     .two_columns("Idli (2)", "45.00", 32, None)
//!     .formatted_line("Total", "75.00", 32, '.', true, true)
//!     .qr_code("https://example.com/r/1042", 6, QrErrorLevel::M)
//!     .feed(3)
//!     .cut(CutStyle::Full)
//!     .into_bytes();
//!
//! let payload = setu::transport::encoding::encode(&receipt);
//! assert_eq!(setu::transport::encoding::decode(&payload)?, receipt);
//! # Ok::<(), setu::SetuError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders and command table |
//! | [`render`] | Image decoding and rasterization |
//! | [`encoder`] | Chainable command stream builder |
//! | [`convert`] | Text, image and PDF converters |
//! | [`transport`] | Payload encoding and printer transports |
//! | [`service`] | Conversion plus delivery |
//! | [`printer`] | Paper profiles and capabilities |
//! | [`error`] | Error types |

pub mod convert;
pub mod encoder;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod service;
pub mod transport;

// Re-exports for convenience
pub use convert::{ConvertOptions, PrintContent, build_print_data};
pub use encoder::CommandEncoder;
pub use error::SetuError;
pub use printer::{Capabilities, PrinterProfile};
pub use service::PrintService;
pub use transport::{DeviceTransport, PrinterTransport};
