#![deny(missing_docs)]
//! Shared logging utilities for the downloader workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! the logger initialization for the application binary, and a minimal test
//! initializer for the global logger.
//!
//! The dispatcher thread records the session generation it is currently
//! applying messages for; the macros prefix every line logged from that thread
//! with `[gen N]` so interleaved sessions can be told apart in the log file.

use std::cell::Cell;
use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Session generation the current thread is acting on. Zero means "none".
    static SESSION_GENERATION: Cell<u64> = const { Cell::new(0) };
}

/// Sets the session generation for the current thread.
/// The dispatcher calls this after every state update.
pub fn set_session_generation(generation: u64) {
    SESSION_GENERATION.with(|v| v.set(generation));
}

/// Retrieves the session generation for the current thread.
/// Returns 0 if no session has been started on this thread.
pub fn session_generation() -> u64 {
    SESSION_GENERATION.with(|v| v.get())
}

/// Prefix prepended by the logging macros: `"[gen N] "`, or empty when unset.
#[doc(hidden)]
pub fn generation_prefix() -> String {
    match session_generation() {
        0 => String::new(),
        generation => format!("[gen {generation}] "),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("{}{}", $crate::generation_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("{}{}", $crate::generation_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("{}{}", $crate::generation_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("{}{}", $crate::generation_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("{}{}", $crate::generation_prefix(), format_args!($($arg)*));
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to the terminal (stderr for warnings and errors, stdout otherwise).
    Terminal,
}

/// Initialize the global logger with the specified destination and level.
///
/// A file that cannot be created is reported on stderr and skipped; a logger
/// that was already installed is left in place.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(path, level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => {
            vec![TermLogger::new(
                level,
                config,
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )]
        }
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: PathBuf,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(&path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // A logger set by another test is left in place.
    initialize(LogDestination::Terminal, level);
}
