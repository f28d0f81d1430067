//! Global error handling for codescan
//!
//! Per-entry and per-file problems never reach this type: they are logged
//! and counted where they happen. What is left are the failures that abort
//! a single project, or the whole batch.

use std::io;
use thiserror::Error;

/// Global error type for codescan operations
#[derive(Error, Debug)]
pub enum ScanError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input directory missing or empty
    #[error("Input error: {0}")]
    Input(String),

    /// Report writer errors
    #[error("Writer error: {0}")]
    Writer(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for codescan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Creates a ScanError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ScanError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            ScanError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn needs_projects(count: usize) -> Result<usize> {
        ensure!(count > 0, Input, "no projects under {}", "in");
        Ok(count)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(needs_projects(3).unwrap(), 3);
        let err = needs_projects(0).unwrap_err();
        assert_eq!(err.to_string(), "Input error: no projects under in");
    }

    #[test]
    fn test_with_context_wraps_message() {
        let raw: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = raw.with_context(|| "opening report").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected error: opening report: gone");
    }
}
