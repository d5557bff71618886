//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to a size-capped log file
//! plus stderr. When the file is full it is rotated: `app.log` becomes
//! `app.1.log`, `app.1.log` becomes `app.2.log`, and the oldest file past
//! `max_files` is dropped. `log` records are bridged into the subscriber.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to prepare log file: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Rotation and filtering settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Size at which the active file is rotated
    pub max_file_bytes: u64,
    /// Files kept on disk, active one included
    pub max_files: usize,
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 5,
            level: "info".to_string(),
        }
    }
}

/// Initialize logging with default settings
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_with_config(log_dir, app_name, LoggerConfig::default())
}

/// Initialize logging into `log_dir/<app_name>.log`
pub fn init_with_config(log_dir: PathBuf, app_name: &str, config: LoggerConfig) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let file = RollingFile::open(&log_dir, app_name, config)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(LocalTime)
                .with_ansi(false)
                .with_writer(file),
        )
        .with(tracing_subscriber::fmt::layer().with_timer(LocalTime).with_writer(io::stderr))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(dir = %log_dir.display(), app = app_name, "logger initialized");
    Ok(())
}

/// Log an info message
pub fn info(message: &str) {
    log::info!("{}", message);
}

/// Log an error message
pub fn error(message: &str) {
    log::error!("{}", message);
}

/// Local wall-clock timestamps
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

struct RollingState {
    dir: PathBuf,
    stem: String,
    config: LoggerConfig,
    file: File,
    written: u64,
}

impl RollingState {
    fn path(&self, index: usize) -> PathBuf {
        file_path(&self.dir, &self.stem, index)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let keep = self.config.max_files.max(1);

        let oldest = self.path(keep - 1);
        if keep > 1 && oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..keep.saturating_sub(1)).rev() {
            let from = self.path(index);
            if from.exists() {
                fs::rename(&from, self.path(index + 1))?;
            }
        }
        if keep > 1 {
            fs::rename(self.path(0), self.path(1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path(0))?;
        self.written = 0;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.config.max_file_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }
}

fn file_path(dir: &Path, stem: &str, index: usize) -> PathBuf {
    if index == 0 {
        dir.join(format!("{}.log", stem))
    } else {
        dir.join(format!("{}.{}.log", stem, index))
    }
}

/// Size-capped log file shared by every writer the subscriber makes
#[derive(Clone)]
pub struct RollingFile {
    state: Arc<Mutex<RollingState>>,
}

impl RollingFile {
    /// Open (appending to) `dir/<stem>.log`, creating `dir` if needed
    pub fn open(dir: &Path, stem: &str, config: LoggerConfig) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = file_path(dir, stem, 0);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            state: Arc::new(Mutex::new(RollingState {
                dir: dir.to_path_buf(),
                stem: stem.to_string(),
                config,
                file,
                written,
            })),
        })
    }

    /// Path of the active file
    pub fn path(&self) -> io::Result<PathBuf> {
        Ok(self.lock()?.path(0))
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, RollingState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFile {
    type Writer = RollingFile;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(max_files: usize) -> LoggerConfig {
        LoggerConfig {
            max_file_bytes: 16,
            max_files,
            level: "debug".to_string(),
        }
    }

    #[test]
    fn test_writes_to_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", LoggerConfig::default()).unwrap();
        writeln!(file, "hello").unwrap();
        file.flush().unwrap();
        let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn test_rotates_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", small(3)).unwrap();
        file.write_all(b"0123456789\n").unwrap();
        file.write_all(b"abcdefghij\n").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("app.1.log")).unwrap(), "0123456789\n");
        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "abcdefghij\n");
    }

    #[test]
    fn test_keeps_at_most_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", small(3)).unwrap();
        for line in ["first-line-xx\n", "second-line-x\n", "third-line-xx\n", "fourth-line-x\n"] {
            file.write_all(line.as_bytes()).unwrap();
        }
        file.flush().unwrap();

        let count = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(count, 3);
        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "fourth-line-x\n");
        assert_eq!(fs::read_to_string(dir.path().join("app.1.log")).unwrap(), "third-line-xx\n");
        assert_eq!(fs::read_to_string(dir.path().join("app.2.log")).unwrap(), "second-line-x\n");
    }

    #[test]
    fn test_single_file_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", small(1)).unwrap();
        file.write_all(b"0123456789\n").unwrap();
        file.write_all(b"abcdefghij\n").unwrap();
        file.flush().unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(fs::read_to_string(file.path().unwrap()).unwrap(), "abcdefghij\n");
    }

    #[test]
    fn test_reopen_appends() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut file = RollingFile::open(dir.path().join("logs").as_path(), "app", LoggerConfig::default()).unwrap();
            file.write_all(b"one\n").unwrap();
        }
        let mut file = RollingFile::open(dir.path().join("logs").as_path(), "app", LoggerConfig::default()).unwrap();
        file.write_all(b"two\n").unwrap();
        file.flush().unwrap();
        let content = fs::read_to_string(dir.path().join("logs").join("app.log")).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }
}
