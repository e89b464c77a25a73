//! # Setu CLI
//!
//! Command-line interface for ESC/POS receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print text on a USB printer
//! setu print --text "Hello, world"
//!
//! # Print the first page of a PDF on an 80mm printer over Bluetooth
//! setu print --file menu.pdf --device /dev/rfcomm0 --profile 80mm
//!
//! # Write the raw command stream to a file instead of a device
//! setu print --file logo.png --output logo.bin
//!
//! # Save a preview of what the print head will produce
//! setu print --file logo.png --png preview.png
//!
//! # Show the transport payload
//! setu encode --text "Hello"
//!
//! # List the opcode table
//! setu opcodes
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use setu::{
    ConvertOptions, PrintContent, PrintService, PrinterProfile, SetuError,
    convert::{self, ContentFile, PageRenderer, PdftoppmRenderer},
    protocol::table::Command,
    render,
    transport::{DeviceTransport, device::DEFAULT_DEVICE, encoding},
};

/// Setu - ESC/POS thermal receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "setu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert content and send it to the printer
    Print {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        settings: Settings,

        /// Printer device path
        #[arg(long, default_value = DEFAULT_DEVICE)]
        device: String,

        /// Number of copies
        #[arg(long, default_value_t = 1)]
        copies: u32,

        /// Write the raw command stream to FILE instead of printing
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Save a PNG preview of the rasterized image or PDF page
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// Print the base64 transport payload for some content
    Encode {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        settings: Settings,
    },

    /// List the literal opcodes
    Opcodes,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Source {
    /// Text to print
    #[arg(long)]
    text: Option<String>,

    /// Image or PDF file to print
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct Settings {
    /// Paper profile (58mm, 80mm)
    #[arg(long, default_value = "58mm")]
    profile: String,

    /// JSON file with conversion options (overrides --profile)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("setu=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SetuError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            source,
            settings,
            device,
            copies,
            output,
            png,
        } => {
            let options = load_options(&settings)?;
            let content = load_content(&source)?;
            let renderer = Arc::new(PdftoppmRenderer::new());

            if let Some(png_path) = png {
                save_preview(&content, renderer.as_ref(), &options, &png_path)?;
                println!("Saved preview to {}", png_path.display());
                return Ok(());
            }

            if let Some(path) = output {
                let job = convert::build_print_data(&content, renderer.as_ref(), &options)?;
                std::fs::write(&path, &job.bytes)?;
                println!("Wrote {} bytes to {}", job.bytes.len(), path.display());
                return Ok(());
            }

            let service = PrintService::new(DeviceTransport::new())
                .with_renderer(renderer)
                .with_options(options);
            let outcome = service.submit(&device, content, copies).await?;

            if !outcome.success {
                return Err(SetuError::Transport(
                    outcome
                        .message
                        .unwrap_or_else(|| "printer rejected the job".to_string()),
                ));
            }
            println!(
                "Printed successfully! (job {})",
                outcome.job_id.as_deref().unwrap_or("-")
            );
        }

        Commands::Encode { source, settings } => {
            let options = load_options(&settings)?;
            let content = load_content(&source)?;
            let job = convert::build_print_data(&content, &PdftoppmRenderer::new(), &options)?;
            println!("{}", encoding::encode(&job.bytes));
        }

        Commands::Opcodes => {
            for command in Command::LITERALS {
                let hex: Vec<String> = command
                    .bytes()
                    .iter()
                    .map(|b| format!("{:02X}", b))
                    .collect();
                println!("{:<24} {}", command.name(), hex.join(" "));
            }
        }
    }

    Ok(())
}

fn load_options(settings: &Settings) -> Result<ConvertOptions, SetuError> {
    if let Some(path) = &settings.config {
        let json = std::fs::read_to_string(path)?;
        return ConvertOptions::from_json(&json);
    }
    let profile = PrinterProfile::by_name(&settings.profile).ok_or_else(|| {
        SetuError::Config(format!(
            "Unknown profile '{}'. Available: 58mm, 80mm",
            settings.profile
        ))
    })?;
    Ok(ConvertOptions::for_profile(&profile))
}

fn load_content(source: &Source) -> Result<PrintContent, SetuError> {
    if let Some(text) = &source.text {
        return Ok(PrintContent::text(text.clone()));
    }
    match &source.file {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            let mut file = ContentFile::new(mime.essence_str(), bytes);
            if let Some(name) = path.file_name() {
                file = file.with_name(name.to_string_lossy());
            }
            Ok(PrintContent::file(file))
        }
        None => Err(SetuError::NothingToPrint),
    }
}

/// Save what the print head will produce as a black-on-white PNG
fn save_preview(
    content: &PrintContent,
    renderer: &dyn PageRenderer,
    options: &ConvertOptions,
    path: &Path,
) -> Result<(), SetuError> {
    let file = content
        .file
        .as_ref()
        .ok_or_else(|| SetuError::Config("PNG preview needs --file".to_string()))?;

    let bitmap = match file.essence().as_str() {
        "application/pdf" => {
            convert::pdf::page_count(&file.bytes)?;
            renderer.render_page(&file.bytes, 0, options.pdf_scale)?
        }
        mime if mime.starts_with("image/") => render::decode_image(&file.bytes)?,
        _ => return Err(SetuError::UnsupportedType(file.mime.clone())),
    };

    let raster = render::rasterize(&bitmap, options.max_width as u32)?;
    raster
        .to_gray_image()
        .save(path)
        .map_err(|e| SetuError::Io(std::io::Error::other(format!("Failed to save PNG: {}", e))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::NamedTempFile;

    struct NoRenderer;

    impl PageRenderer for NoRenderer {
        fn render_page(&self, _: &[u8], _: u32, _: f32) -> Result<RgbaImage, SetuError> {
            Err(SetuError::Decode("no renderer".into()))
        }
    }

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_preview_accepts_mime_parameters() {
        let img = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 0, 255]));
        let content = PrintContent::file(ContentFile::new("Image/PNG; q=0.9", png_bytes(&img)));
        let out = NamedTempFile::with_suffix(".png").unwrap();

        save_preview(&content, &NoRenderer, &ConvertOptions::default(), out.path()).unwrap();

        let preview = image::open(out.path()).unwrap();
        assert_eq!((preview.width(), preview.height()), (4, 2));
    }

    #[test]
    fn test_preview_unsupported_keeps_original_mime() {
        let content = PrintContent::file(ContentFile::new("Text/CSV", b"a,b".to_vec()));
        let out = NamedTempFile::with_suffix(".png").unwrap();
        let err = save_preview(&content, &NoRenderer, &ConvertOptions::default(), out.path())
            .unwrap_err();
        assert!(matches!(err, SetuError::UnsupportedType(ref m) if m == "Text/CSV"));
    }
}
