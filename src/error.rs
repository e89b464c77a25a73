//! # Error Types
//!
//! This module defines error types used throughout the setu library.

use thiserror::Error;

/// Main error type for setu operations
#[derive(Debug, Error)]
pub enum SetuError {
    /// Image or PDF source unreadable, or a zero-dimension bitmap
    #[error("Decode error: {0}")]
    Decode(String),

    /// Content MIME type is not text, an image, or a PDF
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// Neither text nor a file was supplied
    #[error("Nothing to print")]
    NothingToPrint,

    /// Transport-level errors (device, payload encoding)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid command or parameter
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for setu operations
pub type Result<T> = std::result::Result<T, SetuError>;
