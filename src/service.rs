//! # Print Service
//!
//! Ties conversion to delivery. A [`PrintService`] holds the transport
//! client it was built with; there is no process-wide printer handle.
//!
//! ```no_run
//! use setu::convert::PrintContent;
//! use setu::service::PrintService;
//! use setu::transport::DeviceTransport;
//!
//! # async fn demo() -> Result<(), setu::SetuError> {
//! let service = PrintService::new(DeviceTransport::new());
//! let outcome = service
//!     .submit("usb/lp0", PrintContent::text("Hello"), 1)
//!     .await?;
//! assert!(outcome.success);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::convert::{self, ConvertOptions, PageRenderer, PdftoppmRenderer, PrintContent};
use crate::error::SetuError;
use crate::transport::{PrintMetadata, PrintOutcome, PrinterTransport, encoding};

/// Converts content and hands the finished stream to a transport.
pub struct PrintService<T: PrinterTransport> {
    transport: T,
    renderer: Arc<dyn PageRenderer>,
    options: ConvertOptions,
}

impl<T: PrinterTransport> PrintService<T> {
    /// Service with default options and the `pdftoppm` renderer.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            renderer: Arc::new(PdftoppmRenderer::new()),
            options: ConvertOptions::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn PageRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert `content` and send `copies` copies to `printer_id`.
    ///
    /// Conversion runs on the blocking pool. If it fails, the error is
    /// returned and the transport is never called.
    pub async fn submit(
        &self,
        printer_id: &str,
        content: PrintContent,
        copies: u32,
    ) -> Result<PrintOutcome, SetuError> {
        let renderer = Arc::clone(&self.renderer);
        let options = self.options;

        let job = tokio::task::spawn_blocking(move || {
            convert::build_print_data(&content, renderer.as_ref(), &options)
        })
        .await
        .map_err(|e| SetuError::Transport(format!("conversion task failed: {}", e)))?
        .inspect_err(|e| tracing::warn!(error = %e, "conversion failed, nothing sent"))?;

        let payload = encoding::encode(&job.bytes);
        let metadata = PrintMetadata {
            copies: copies.max(1),
            content_type: job.content_type,
        };

        tracing::info!(
            printer_id,
            bytes = job.bytes.len(),
            copies = metadata.copies,
            content_type = %metadata.content_type,
            "submitting print job"
        );

        let outcome = self.transport.print(printer_id, &payload, &metadata).await?;
        if !outcome.success {
            tracing::warn!(
                printer_id,
                message = outcome.message.as_deref().unwrap_or(""),
                "printer rejected job"
            );
        }
        Ok(outcome)
    }
}

// ============================================================================
// TESTS
// ============================================================================
