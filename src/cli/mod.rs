//! Command-line entry: option dispatch and diagnostics.

pub mod dispatch;

use std::ffi::OsStr;
use std::path::Path;

pub use dispatch::{Dispatcher, EXIT_LINE, HELP_HINT, write_diagnostic};

/// Name used to prefix diagnostics, derived from `argv[0]`.
#[must_use]
pub fn program_name(argv0: Option<&OsStr>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
