// src/util/log.rs

//! File-based logging for the terminal UI.
//!
//! Anything printed to stdout would tear the rendered dashboard, so every
//! severity gets its own file under the configured log directory. Lines are
//! also forwarded to `tracing` for whichever subscriber the binary installs.
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use chrono::Local;
use serde::Deserialize;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Log severity levels, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn filename(&self) -> &str {
        match self {
            LogLevel::Error => "error.log",
            LogLevel::Warn => "warn.log",
            LogLevel::Info => "info.log",
            LogLevel::Debug => "debug.log",
        }
    }

    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
        }
    }
}

/// Logger that writes to separate files by severity
pub struct Logger {
    log_dir: PathBuf,
    max_level: LogLevel,
    error_file: Mutex<File>,
    warn_file: Mutex<File>,
    info_file: Mutex<File>,
    debug_file: Mutex<File>,
}

impl Logger {
    /// Creates the directory and truncates all four files.
    pub fn new(log_dir: &Path, max_level: LogLevel) -> std::io::Result<Self> {
        create_dir_all(log_dir)?;

        let open = |level: LogLevel| File::create(log_dir.join(level.filename())).map(Mutex::new);

        Ok(Self {
            log_dir: log_dir.to_path_buf(),
            max_level,
            error_file: open(LogLevel::Error)?,
            warn_file: open(LogLevel::Warn)?,
            info_file: open(LogLevel::Info)?,
            debug_file: open(LogLevel::Debug)?,
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.max_level
    }

    pub fn write_log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let formatted = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);

        let file = match level {
            LogLevel::Error => &self.error_file,
            LogLevel::Warn => &self.warn_file,
            LogLevel::Info => &self.info_file,
            LogLevel::Debug => &self.debug_file,
        };

        if let Ok(mut file) = file.lock() {
            let _ = file.write_all(formatted.as_bytes());
            let _ = file.flush();
        }
    }
}

/// Installs the process-wide logger. Later calls keep the first logger.
pub fn init(log_dir: &Path, max_level: LogLevel) -> std::io::Result<&'static Logger> {
    if let Some(logger) = LOGGER.get() {
        return Ok(logger);
    }
    let logger = Logger::new(log_dir, max_level)?;
    Ok(LOGGER.get_or_init(|| logger))
}

pub fn logger() -> Option<&'static Logger> {
    LOGGER.get()
}

#[doc(hidden)]
pub fn __write(level: LogLevel, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.write_log(level, message);
    }
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        ::tracing::error!("{}", message);
        $crate::util::log::__write($crate::util::log::LogLevel::Error, &message);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        ::tracing::warn!("{}", message);
        $crate::util::log::__write($crate::util::log::LogLevel::Warn, &message);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        ::tracing::info!("{}", message);
        $crate::util::log::__write($crate::util::log::LogLevel::Info, &message);
    }};
}

/// Skips formatting entirely unless the installed logger wants debug lines.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if $crate::util::log::logger()
            .map_or(false, |l| l.enabled($crate::util::log::LogLevel::Debug))
        {
            let message = format!($($arg)*);
            ::tracing::debug!("{}", message);
            $crate::util::log::__write($crate::util::log::LogLevel::Debug, &message);
        }
    }};
}
