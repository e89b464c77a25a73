//! # Content Converters
//!
//! One entry point per content kind, each producing a finished command
//! stream:
//!
//! | Content | Entry point | Stream |
//! |---------|-------------|--------|
//! | Text | [`text_to_pos`] | reset, left, normal size, text, 3 LF, cut |
//! | Image | [`image_to_pos`] | reset, center, raster, 3 LF, cut |
//! | PDF | [`pdf_first_page_to_pos`] | page 1 rendered at 2×, then as an image |
//!
//! [`build_print_data`] dispatches a [`PrintContent`] to the right one.
//!
//! Every conversion owns its encoder and raster outright, so independent
//! conversions can run on any number of threads at once.

pub mod pdf;

pub use pdf::{PageRenderer, PdftoppmRenderer};

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::encoder::{CommandEncoder, CutStyle};
use crate::error::SetuError;
use crate::printer::{Capabilities, PrinterProfile};
use crate::protocol::text::{Alignment, TextSize};
use crate::render::{self, DEFAULT_MAX_WIDTH};
use crate::transport::ContentType;

/// Trailing blank lines before the cut
const TRAILING_FEED: usize = 3;

/// Conversion settings.
///
/// Missing JSON fields take their defaults:
///
/// ```
/// use setu::convert::ConvertOptions;
///
/// let opts = ConvertOptions::from_json(r#"{ "max_width": 576 }"#).unwrap();
/// assert_eq!(opts.max_width, 576);
/// assert_eq!(opts.pdf_scale, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Widest raster in dots; wider bitmaps are scaled down
    pub max_width: u16,
    /// PDF render scale (1.0 = 72 DPI)
    pub pdf_scale: f32,
    pub capabilities: Capabilities,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH as u16,
            pdf_scale: 2.0,
            capabilities: Capabilities::default(),
        }
    }
}

impl ConvertOptions {
    pub fn for_profile(profile: &PrinterProfile) -> Self {
        Self {
            max_width: profile.width_dots,
            capabilities: Capabilities::for_profile(profile),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SetuError> {
        let opts: Self = serde_json::from_str(json)
            .map_err(|e| SetuError::Config(format!("invalid convert options: {}", e)))?;
        if opts.max_width == 0 {
            return Err(SetuError::Config("max_width must be positive".to_string()));
        }
        if !(opts.pdf_scale.is_finite() && opts.pdf_scale > 0.0) {
            return Err(SetuError::Config(format!(
                "pdf_scale must be positive, got {}",
                opts.pdf_scale
            )));
        }
        Ok(opts)
    }
}

/// A file to print: its MIME type and raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    pub mime: String,
    pub bytes: Vec<u8>,
    pub name: Option<String>,
}

impl ContentFile {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// MIME essence, lower-cased and without parameters.
    ///
    /// ```
    /// use setu::convert::ContentFile;
    ///
    /// let file = ContentFile::new("Image/PNG; q=0.9", Vec::new());
    /// assert_eq!(file.essence(), "image/png");
    /// ```
    pub fn essence(&self) -> String {
        self.mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

/// What the caller wants printed. Non-empty text takes precedence over a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintContent {
    pub text: Option<String>,
    pub file: Option<ContentFile>,
}

impl PrintContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file: None,
        }
    }

    pub fn file(file: ContentFile) -> Self {
        Self {
            text: None,
            file: Some(file),
        }
    }
}

/// A finished command stream and the kind of content it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub bytes: Vec<u8>,
    pub content_type: ContentType,
}

/// Plain text, left-aligned at normal size.
///
/// ```
/// let bytes = setu::convert::text_to_pos("A");
/// assert!(bytes.starts_with(&[0x1B, 0x1B, 0x40]));
/// assert!(bytes.ends_with(&[0x1D, 0x56, 0x00]));
/// ```
pub fn text_to_pos(text: &str) -> Vec<u8> {
    text_to_pos_with(text, Capabilities::default())
}

/// [`text_to_pos`] for a printer described by `capabilities`.
pub fn text_to_pos_with(text: &str, capabilities: Capabilities) -> Vec<u8> {
    let bytes = job_encoder(capabilities)
        .align(Alignment::Left)
        .size(TextSize::Normal)
        .text(text)
        .newline(TRAILING_FEED)
        .cut(CutStyle::Full)
        .into_bytes();
    tracing::debug!(chars = text.chars().count(), bytes = bytes.len(), "converted text");
    bytes
}

/// A decoded bitmap, centered and scaled to at most `max_width` dots.
pub fn image_to_pos(bitmap: &RgbaImage, max_width: u32) -> Result<Vec<u8>, SetuError> {
    image_to_pos_with(bitmap, max_width, Capabilities::default())
}

/// [`image_to_pos`] for a printer described by `capabilities`.
pub fn image_to_pos_with(
    bitmap: &RgbaImage,
    max_width: u32,
    capabilities: Capabilities,
) -> Result<Vec<u8>, SetuError> {
    let raster = render::rasterize(bitmap, max_width)?;
    let bytes = job_encoder(capabilities)
        .align(Alignment::Center)
        .add_image(&raster.to_command())
        .newline(TRAILING_FEED)
        .cut(CutStyle::Full)
        .into_bytes();
    tracing::debug!(
        width = raster.width(),
        height = raster.height(),
        bytes = bytes.len(),
        "converted image"
    );
    Ok(bytes)
}

/// Encoded image file (PNG, JPEG, GIF, BMP, WebP ...) to a command stream.
pub fn image_bytes_to_pos(bytes: &[u8], max_width: u32) -> Result<Vec<u8>, SetuError> {
    image_bytes_to_pos_with(bytes, max_width, Capabilities::default())
}

/// [`image_bytes_to_pos`] for a printer described by `capabilities`.
pub fn image_bytes_to_pos_with(
    bytes: &[u8],
    max_width: u32,
    capabilities: Capabilities,
) -> Result<Vec<u8>, SetuError> {
    let bitmap = render::decode_image(bytes)?;
    image_to_pos_with(&bitmap, max_width, capabilities)
}

/// A reset encoder bound to the target printer.
fn job_encoder(capabilities: Capabilities) -> CommandEncoder {
    CommandEncoder::with_capabilities(capabilities).reset()
}

/// Page 1 of a PDF, rendered at `opts.pdf_scale` and printed as an image.
/// Later pages are never rendered.
pub fn pdf_first_page_to_pos(
    pdf_bytes: &[u8],
    renderer: &dyn PageRenderer,
    opts: &ConvertOptions,
) -> Result<Vec<u8>, SetuError> {
    let pages = pdf::page_count(pdf_bytes)?;
    if pages > 1 {
        tracing::warn!(pages, "only the first PDF page is printed");
    }

    let bitmap = renderer.render_page(pdf_bytes, 0, opts.pdf_scale)?;
    tracing::debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        scale = opts.pdf_scale,
        "rendered PDF page 1"
    );
    image_to_pos_with(&bitmap, opts.max_width as u32, opts.capabilities)
}

/// Pick the converter for `content` and run it.
///
/// ## Errors
///
/// - [`SetuError::NothingToPrint`] when there is neither text nor a file
/// - [`SetuError::UnsupportedType`] for files that are not `image/*` or
///   `application/pdf`
/// - [`SetuError::Decode`] for unreadable images or PDFs
pub fn build_print_data(
    content: &PrintContent,
    renderer: &dyn PageRenderer,
    opts: &ConvertOptions,
) -> Result<PrintJob, SetuError> {
    if let Some(text) = content.text.as_deref().filter(|t| !t.is_empty()) {
        return Ok(PrintJob {
            bytes: text_to_pos_with(text, opts.capabilities),
            content_type: ContentType::Text,
        });
    }

    let file = content.file.as_ref().ok_or(SetuError::NothingToPrint)?;
    let mime = file.essence();
    tracing::debug!(
        file = file.name.as_deref().unwrap_or("-"),
        mime = %mime,
        bytes = file.bytes.len(),
        "dispatching file"
    );

    if mime.starts_with("image/") {
        Ok(PrintJob {
            bytes: image_bytes_to_pos_with(
                &file.bytes,
                opts.max_width as u32,
                opts.capabilities,
            )?,
            content_type: ContentType::Image,
        })
    } else if mime == "application/pdf" {
        Ok(PrintJob {
            bytes: pdf_first_page_to_pos(&file.bytes, renderer, opts)?,
            content_type: ContentType::Pdf,
        })
    } else {
        Err(SetuError::UnsupportedType(file.mime.clone()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
