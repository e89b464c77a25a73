//! PDF inspection and page rendering.
//!
//! The crate never rasterizes PDF content itself. A [`PageRenderer`] turns
//! one page into pixels; [`PdftoppmRenderer`] does that with poppler's
//! `pdftoppm`. [`page_count`] parses the document with `lopdf` so broken
//! files fail before any renderer runs.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use image::RgbaImage;
use lopdf::Document;

use crate::error::SetuError;

/// Points per inch; a scale of 1.0 renders at this resolution
pub const BASE_DPI: f32 = 72.0;

/// Renders a single PDF page to an RGBA bitmap.
pub trait PageRenderer: Send + Sync {
    /// Render page `page_index` (0-based) at `scale` × 72 DPI.
    fn render_page(&self, pdf: &[u8], page_index: u32, scale: f32)
    -> Result<RgbaImage, SetuError>;
}

/// Number of pages in a PDF.
///
/// ## Errors
///
/// [`SetuError::Decode`] when the document can't be parsed or has no pages.
pub fn page_count(pdf: &[u8]) -> Result<usize, SetuError> {
    let document = Document::load_mem(pdf)
        .map_err(|e| SetuError::Decode(format!("failed to load PDF: {}", e)))?;
    let pages = document.get_pages().len();
    if pages == 0 {
        return Err(SetuError::Decode("PDF has no pages".to_string()));
    }
    tracing::debug!(pages, "PDF loaded");
    Ok(pages)
}

/// [`PageRenderer`] backed by the `pdftoppm` command line tool.
///
/// The document is piped through stdin and a PNG is read back from stdout,
/// so nothing touches the filesystem.
#[derive(Debug, Clone)]
pub struct PdftoppmRenderer {
    program: PathBuf,
}

impl Default for PdftoppmRenderer {
    fn default() -> Self {
        Self {
            program: PathBuf::from("pdftoppm"),
        }
    }
}

impl PdftoppmRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `pdftoppm` binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(page_index: u32, scale: f32) -> Vec<String> {
        let page = (page_index + 1).to_string();
        let dpi = (BASE_DPI * scale).round().max(1.0);
        vec![
            "-f".into(),
            page.clone(),
            "-l".into(),
            page,
            "-singlefile".into(),
            "-r".into(),
            format!("{}", dpi),
            "-png".into(),
            "-".into(),
        ]
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render_page(
        &self,
        pdf: &[u8],
        page_index: u32,
        scale: f32,
    ) -> Result<RgbaImage, SetuError> {
        let mut child = Command::new(&self.program)
            .args(Self::args(page_index, scale))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SetuError::Decode(format!(
                    "failed to run {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SetuError::Decode("pdftoppm stdin unavailable".to_string()))?;
        let input = pdf.to_vec();
        let feeder = thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output()?;
        match feeder.join() {
            Ok(Err(e)) => tracing::debug!(error = %e, "pdftoppm stdin write failed"),
            Err(_) => tracing::debug!("pdftoppm stdin writer panicked"),
            Ok(Ok(())) => {}
        }

        if !output.status.success() {
            return Err(SetuError::Decode(format!(
                "pdftoppm failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let png = image::load_from_memory(&output.stdout)
            .map_err(|e| SetuError::Decode(format!("unreadable pdftoppm output: {}", e)))?;
        Ok(png.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Object, Stream, dictionary};

    fn blank_pdf(pages: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids = Vec::new();
        for _ in 0..pages {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 200.into(), 100.into()],
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(&blank_pdf(1)).unwrap(), 1);
        assert_eq!(page_count(&blank_pdf(4)).unwrap(), 4);
    }

    #[test]
    fn test_page_count_rejects_garbage() {
        assert!(matches!(
            page_count(b"%PDF-1.4 truncated"),
            Err(SetuError::Decode(_))
        ));
    }

    #[test]
    fn test_pdftoppm_args() {
        assert_eq!(
            PdftoppmRenderer::args(0, 2.0),
            vec!["-f", "1", "-l", "1", "-singlefile", "-r", "144", "-png", "-"]
        );
        assert_eq!(PdftoppmRenderer::args(2, 1.0)[1], "3");
    }

    #[test]
    fn test_missing_program_is_decode_error() {
        let renderer = PdftoppmRenderer::with_program("/nonexistent/pdftoppm");
        assert!(matches!(
            renderer.render_page(&blank_pdf(1), 0, 2.0),
            Err(SetuError::Decode(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_renderer_exiting_early_reports_exit_status() {
        // `false` never reads stdin, so the write side may hit a closed pipe
        let renderer = PdftoppmRenderer::with_program("false");
        let big = vec![b'%'; 1 << 20];
        match renderer.render_page(&big, 0, 2.0) {
            Err(SetuError::Decode(msg)) => assert!(msg.starts_with("pdftoppm failed"), "{}", msg),
            other => panic!("expected decode error, got {:?}", other.map(|i| i.dimensions())),
        }
    }
}
