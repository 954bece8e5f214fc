//! optdemo - getopt-style option parsing demo
//!
//! Parses `-h`, `-i <file>`, `-f` and `-b` (plus their long forms) the way
//! GNU `getopt_long` does, and prints option arguments through a scoped
//! wide-character output mode.

// Note: deny (not forbid) to allow #[allow(unsafe_code)] in test helpers for env var manipulation
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod getopt;
pub mod output;
pub mod storage;
pub mod util;

/// Test utilities module - included in test builds or when test-utils feature is enabled.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{ExitCode, OptError, Result};
