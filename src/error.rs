//! Error types for readbench operations.
//!
//! This module provides the error hierarchy using `thiserror` for session
//! management, file I/O, benchmark configuration, and CLI commands.
//!
//! Nothing here crosses the JNI boundary as a value: the bridge maps these
//! errors to Java exceptions (see [`crate::bridge`]).

use thiserror::Error;

/// Result type alias for readbench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Read-session errors (handles, buffer sizes).
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Benchmark configuration or execution errors.
    #[error("benchmark error: {0}")]
    Bench(#[from] BenchError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Read-session errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Buffer size was zero or negative.
    #[error("buffer size must be positive, got {size}")]
    InvalidBufferSize {
        /// Requested buffer size as received from the caller.
        size: i64,
    },

    /// Handle was never issued or has already been torn down.
    #[error("unknown session handle: {handle}")]
    UnknownHandle {
        /// Raw handle value.
        handle: i64,
    },

    /// Session mutex was poisoned by a panicking run.
    #[error("session {handle} is poisoned")]
    Poisoned {
        /// Raw handle value.
        handle: i64,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to open a file.
    #[error("failed to open file: {path}: {reason}")]
    OpenFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to read a file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to create or size a file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// Benchmark errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// Unknown read strategy name.
    #[error("unknown read strategy: {name}")]
    UnknownStrategy {
        /// Name of the unknown strategy.
        name: String,
    },

    /// Invalid benchmark configuration.
    #[error("invalid benchmark configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },

    /// Buffer size step could not be parsed.
    #[error("unsupported buffer size step: {input}")]
    InvalidStep {
        /// The rejected step expression.
        input: String,
    },

    /// A strategy was run without a successful setup.
    #[error("strategy {name} used before setup")]
    NotPrepared {
        /// Strategy name.
        name: &'static str,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}
