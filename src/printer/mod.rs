//! # Printer Module
//!
//! Printer hardware descriptions.
//!
//! ## Modules
//!
//! - [`config`]: Paper-width profiles (58mm, 80mm)
//! - [`capabilities`]: Optional-command support descriptor

pub mod capabilities;
pub mod config;

pub use capabilities::Capabilities;
pub use config::PrinterProfile;
