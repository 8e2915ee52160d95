//! Rolling Logger
//!
//! Installs a `tracing-subscriber` formatter writing to stderr and to a
//! size-rotated log file. `log` macros are bridged, so crates using the `log`
//! facade end up in the same file.
//!
//! Files: `<app>.log` (current), `<app>.1.log` ... `<app>.<N-1>.log` (older).
//! Once `max_files` exist the oldest is dropped.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 5;

static INITIALIZED: OnceLock<PathBuf> = OnceLock::new();

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Log file error: {0}")]
    Io(#[from] io::Error),

    #[error("Logger already installed: {0}")]
    AlreadyInstalled(String),

    #[error("Logger not initialized")]
    NotInitialized,
}

/// Size-rotated log file
pub struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: impl AsRef<Path>, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let path = Self::path_for(&dir, app_name, 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        let mut rolling = Self {
            dir,
            app_name: app_name.to_string(),
            max_bytes,
            max_files: max_files.max(1),
            file,
            written,
        };
        let banner = format!(
            "=== {} started {} ===\n",
            app_name,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
        );
        rolling.write_all(banner.as_bytes())?;
        Ok(rolling)
    }

    fn path_for(dir: &Path, app_name: &str, index: usize) -> PathBuf {
        if index == 0 {
            dir.join(format!("{}.log", app_name))
        } else {
            dir.join(format!("{}.{}.log", app_name, index))
        }
    }

    pub fn current_path(&self) -> PathBuf {
        Self::path_for(&self.dir, &self.app_name, 0)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = Self::path_for(&self.dir, &self.app_name, self.max_files - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (0..self.max_files - 1).rev() {
            let from = Self::path_for(&self.dir, &self.app_name, index);
            if from.exists() {
                fs::rename(&from, Self::path_for(&self.dir, &self.app_name, index + 1))?;
            }
        }

        self.file = OpenOptions::new().create(true).append(true).open(self.current_path())?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Install the global subscriber with default rotation limits.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, DEFAULT_MAX_BYTES, DEFAULT_MAX_FILES)
}

pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    max_bytes: u64,
    max_files: usize,
) -> Result<(), LoggerError> {
    let rolling = RollingFile::open(&log_dir, app_name, max_bytes, max_files)?;
    let path = rolling.current_path();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(io::stderr.and(Mutex::new(rolling)))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))?;

    let _ = INITIALIZED.set(path);
    Ok(())
}

/// Path of the active log file, once installed
pub fn log_file() -> Option<&'static Path> {
    INITIALIZED.get().map(PathBuf::as_path)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    log_file().ok_or(LoggerError::NotInitialized)?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    log_file().ok_or(LoggerError::NotInitialized)?;
    tracing::error!("{}", message);
    Ok(())
}
