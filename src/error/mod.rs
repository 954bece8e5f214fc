//! Error types for optdemo.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! - **Usage**: option parsing failures (unknown option, missing argument, ...)
//! - **Encoding**: option arguments that cannot be rendered as wide text
//! - **Configuration**: config file or environment values that are invalid
//! - **Internal**: I/O failures while writing output
//!
//! Each error has a stable error code (e.g., `OPTD-P001`) for programmatic
//! handling.

use thiserror::Error;

use crate::getopt::ParseError;
use crate::output::ConversionError;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The command line was not understood.
    Usage,
    /// Text could not be converted for output.
    Encoding,
    /// Configuration issues (parse errors, invalid values).
    Configuration,
    /// Unexpected errors (I/O on the output streams).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Usage => "Usage error",
            Self::Encoding => "Encoding error",
            Self::Configuration => "Configuration error",
            Self::Internal => "Internal error",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success, including an explicit help request.
    Success = 0,
    /// Any parse, conversion, configuration or output failure.
    Failure = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Main error type for optdemo operations.
#[derive(Error, Debug)]
pub enum OptError {
    /// Command-line token rejected by the parser.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Option argument is not valid Unicode.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Error reading or parsing the configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid value in configuration or environment.
    #[error("invalid config value for '{key}': '{value}' ({message})")]
    ConfigInvalid {
        key: String,
        value: String,
        message: String,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OptError {
    /// Every failure ends the process with status 1.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }

    /// Returns the error category for classification.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::Usage,
            Self::Conversion(_) => ErrorCategory::Encoding,
            Self::ConfigParse { .. } | Self::ConfigInvalid { .. } => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `OPTD-{category}{number}` where category is:
    /// - P: Parse (usage)
    /// - E: Encoding
    /// - C: Configuration
    /// - X: Internal
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(err) => err.code(),
            Self::Conversion(_) => "OPTD-E001",
            Self::ConfigParse { .. } => "OPTD-C001",
            Self::ConfigInvalid { .. } => "OPTD-C002",
            Self::Io(_) => "OPTD-X001",
        }
    }
}

/// Result type alias for optdemo operations.
pub type Result<T> = std::result::Result<T, OptError>;
