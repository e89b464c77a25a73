//! # Printer Transport Layer
//!
//! Finished command streams leave the crate in their transport form
//! ([`encoding`]) and are handed to a [`PrinterTransport`].
//!
//! ## Available Transports
//!
//! - [`device`]: character device (USB line printer, RFCOMM serial)
//!
//! Anything else (network sockets, a platform print bridge, a test double)
//! implements [`PrinterTransport`] directly.

pub mod device;
pub mod encoding;

pub use device::DeviceTransport;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::SetuError;

/// Kind of content a command stream was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Pdf,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Pdf => "pdf",
        })
    }
}

/// Metadata sent alongside every payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrintMetadata {
    pub copies: u32,
    pub content_type: ContentType,
}

/// What the transport reports back for one job
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PrintOutcome {
    pub success: bool,
    pub job_id: Option<String>,
    pub message: Option<String>,
}

impl PrintOutcome {
    pub fn accepted(job_id: impl Into<String>) -> Self {
        Self {
            success: true,
            job_id: Some(job_id.into()),
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            job_id: None,
            message: Some(message.into()),
        }
    }
}

/// Delivers transport-encoded command streams to a printer.
///
/// `payload` is always the [`encoding::encode`] form of the stream.
#[async_trait]
pub trait PrinterTransport: Send + Sync {
    async fn print(
        &self,
        printer_id: &str,
        payload: &str,
        metadata: &PrintMetadata,
    ) -> Result<PrintOutcome, SetuError>;
}

#[async_trait]
impl<T: PrinterTransport + ?Sized> PrinterTransport for std::sync::Arc<T> {
    async fn print(
        &self,
        printer_id: &str,
        payload: &str,
        metadata: &PrintMetadata,
    ) -> Result<PrintOutcome, SetuError> {
        (**self).print(printer_id, payload, metadata).await
    }
}
