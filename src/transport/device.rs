//! # Character Device Transport
//!
//! Writes command streams straight to a printer's character device:
//! a USB line printer (`/dev/usb/lp0`) or a Bluetooth serial port bound
//! with `rfcomm bind` (`/dev/rfcomm0`).
//!
//! ## TTY Configuration
//!
//! When the device is a terminal (RFCOMM, USB serial adapters) it is put in
//! raw mode so binary data passes through unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR,
//!   ICRNL off
//! - **No flow control**: IXON, IXOFF, IXANY off (0x11 and 0x13 occur in
//!   raster data)
//! - **No output processing**: OPOST off (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **Non-canonical, no echo**: ICANON, ECHO, ECHONL, ISIG, IEXTEN off
//!
//! Line printer nodes are not terminals and are written as-is.
//!
//! ## Chunked Writes
//!
//! Large streams are written in 4096-byte chunks with a short pause between
//! them so small printer buffers don't overflow.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;

use super::{PrintMetadata, PrintOutcome, PrinterTransport, encoding};
use crate::error::SetuError;

/// Default USB line printer node
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// An open printer device.
///
/// ```no_run
/// use setu::transport::device::DeviceWriter;
/// use setu::protocol::commands;
///
/// let mut writer = DeviceWriter::open("/dev/rfcomm0")?;
/// writer.write_all(&commands::init())?;
/// # Ok::<(), setu::SetuError>(())
/// ```
pub struct DeviceWriter {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceWriter {
    /// Open `device` for writing, switching terminals to raw mode.
    ///
    /// ## Errors
    ///
    /// - The device doesn't exist
    /// - Permission denied (usually needs the `lp` or `dialout` group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, SetuError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            SetuError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let fd = file.as_raw_fd();
        if is_tty(fd) {
            configure_tty_raw(fd)?;
        }

        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    /// Write the whole stream and flush.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), SetuError> {
        if data.len() <= self.chunk_size {
            self.file
                .write_all(data)
                .map_err(|e| SetuError::Transport(format!("Write failed: {}", e)))?;
        } else {
            for chunk in data.chunks(self.chunk_size) {
                self.file
                    .write_all(chunk)
                    .map_err(|e| SetuError::Transport(format!("Write failed: {}", e)))?;

                if !self.chunk_delay.is_zero() {
                    thread::sleep(self.chunk_delay);
                }
            }
        }

        self.file
            .flush()
            .map_err(|e| SetuError::Transport(format!("Flush failed: {}", e)))
    }
}

/// [`PrinterTransport`] over character devices.
///
/// The printer id is the device path, relative ids resolve against
/// `device_dir` (`/dev` by default), so `"rfcomm0"` and `"/dev/rfcomm0"`
/// name the same printer. Each copy is written in full before the next.
#[derive(Debug, Clone)]
pub struct DeviceTransport {
    device_dir: PathBuf,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl Default for DeviceTransport {
    fn default() -> Self {
        Self {
            device_dir: PathBuf::from("/dev"),
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        }
    }
}

impl DeviceTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.device_dir = dir.into();
        self
    }

    pub fn with_chunking(mut self, size: usize, delay: Duration) -> Self {
        self.chunk_size = size;
        self.chunk_delay = delay;
        self
    }

    /// Device path for a printer id.
    pub fn resolve(&self, printer_id: &str) -> PathBuf {
        let path = Path::new(printer_id);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.device_dir.join(path)
        }
    }
}

#[async_trait]
impl PrinterTransport for DeviceTransport {
    async fn print(
        &self,
        printer_id: &str,
        payload: &str,
        metadata: &PrintMetadata,
    ) -> Result<PrintOutcome, SetuError> {
        let bytes = encoding::decode(payload)?;
        let path = self.resolve(printer_id);
        let copies = metadata.copies.max(1);
        let (chunk_size, chunk_delay) = (self.chunk_size, self.chunk_delay);
        let job_id = uuid::Uuid::new_v4().to_string();

        tracing::info!(
            job_id = %job_id,
            device = %path.display(),
            bytes = bytes.len(),
            copies,
            content_type = %metadata.content_type,
            "sending job to device"
        );

        let device = path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), SetuError> {
            let mut writer = DeviceWriter::open(&device)?;
            writer.set_chunk_size(chunk_size);
            writer.set_chunk_delay(chunk_delay);
            for _ in 0..copies {
                writer.write_all(&bytes)?;
            }
            Ok(())
        })
        .await
        .map_err(|e| SetuError::Transport(format!("device writer panicked: {}", e)))??;

        let noun = if copies == 1 { "copy" } else { "copies" };
        Ok(PrintOutcome {
            success: true,
            job_id: Some(job_id),
            message: Some(format!("{} {} sent to {}", copies, noun, path.display())),
        })
    }
}

#[cfg(unix)]
fn is_tty(fd: i32) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

#[cfg(not(unix))]
fn is_tty(_fd: i32) -> bool {
    false
}

/// Put a terminal file descriptor in raw mode.
#[cfg(unix)]
fn configure_tty_raw(fd: i32) -> Result<(), SetuError> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(SetuError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(SetuError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_fd: i32) -> Result<(), SetuError> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
