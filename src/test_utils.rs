//! Test utilities for optdemo.
//!
//! Provides a recording console, a temporary config directory, and argument
//! helpers for use across all test modules.
//!
//! # Usage
//!
//! ```rust,ignore
//! use optdemo::test_utils::*;
//!
//! let mut console = RecordingConsole::new(TextMode::Narrow);
//! let dir = TestDir::new();
//! let config = dir.create_file("config.toml", "[general]\nvariant = \"help-alias\"");
//! ```

use std::ffi::OsString;
use std::io;
#[cfg(feature = "test-utils")]
use std::{
    fs,
    io::Write as IoWrite,
    path::{Path, PathBuf},
};

use crate::output::{Console, TextMode, from_wide};

// =============================================================================
// Recording Console
// =============================================================================

/// One observable action on a [`RecordingConsole`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    ModeSwitch { from: TextMode, to: TextMode },
    Narrow(String),
    Wide(Vec<u16>),
}

/// In-memory [`Console`] that records every write and mode switch.
///
/// Like the real console it rejects writes that don't match the current
/// mode. Failures can be injected for the next write or mode switch.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    mode: TextMode,
    events: Vec<ConsoleEvent>,
    fail_write: bool,
    fail_switch: bool,
}

impl RecordingConsole {
    #[must_use]
    pub fn new(mode: TextMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn events(&self) -> &[ConsoleEvent] {
        &self.events
    }

    /// `(from, to)` pairs of every mode switch, in order.
    #[must_use]
    pub fn mode_switches(&self) -> Vec<(TextMode, TextMode)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ConsoleEvent::ModeSwitch { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// All written text, narrow and wide, in order.
    ///
    /// # Panics
    ///
    /// Panics if a wide write holds invalid UTF-16.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for event in &self.events {
            match event {
                ConsoleEvent::Narrow(text) => out.push_str(text),
                ConsoleEvent::Wide(units) => {
                    out.push_str(&from_wide(units).expect("recorded invalid UTF-16"));
                }
                ConsoleEvent::ModeSwitch { .. } => {}
            }
        }
        out
    }

    /// Make the next narrow or wide write fail.
    pub fn fail_next_write(&mut self) {
        self.fail_write = true;
    }

    /// Make the next mode switch fail.
    pub fn fail_next_switch(&mut self) {
        self.fail_switch = true;
    }

    fn check_write(&mut self, expected: TextMode) -> io::Result<()> {
        if std::mem::take(&mut self.fail_write) {
            return Err(io::Error::other("injected write failure"));
        }
        if self.mode != expected {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{expected} write in {} mode", self.mode),
            ));
        }
        Ok(())
    }
}

impl Console for RecordingConsole {
    fn mode(&self) -> TextMode {
        self.mode
    }

    fn set_mode(&mut self, mode: TextMode) -> io::Result<TextMode> {
        if std::mem::take(&mut self.fail_switch) {
            return Err(io::Error::other("injected mode switch failure"));
        }
        let from = std::mem::replace(&mut self.mode, mode);
        self.events.push(ConsoleEvent::ModeSwitch { from, to: mode });
        Ok(from)
    }

    fn write_narrow(&mut self, text: &str) -> io::Result<()> {
        self.check_write(TextMode::Narrow)?;
        self.events.push(ConsoleEvent::Narrow(text.to_string()));
        Ok(())
    }

    fn write_wide(&mut self, units: &[u16]) -> io::Result<()> {
        self.check_write(TextMode::Wide)?;
        self.events.push(ConsoleEvent::Wide(units.to_vec()));
        Ok(())
    }
}

// =============================================================================
// Arguments
// =============================================================================

/// Build an argument vector from string literals.
#[must_use]
pub fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

// =============================================================================
// Temporary Directory
// =============================================================================

/// Isolated temporary directory, removed when dropped. Uses the `tempfile`
/// crate internally.
///
/// # Examples
///
/// ```rust,ignore
/// use optdemo::test_utils::TestDir;
///
/// let dir = TestDir::new();
/// let path = dir.create_file("config.toml", "[output]\ntext_mode = \"wide\"");
/// ```
#[cfg(feature = "test-utils")]
pub struct TestDir {
    inner: tempfile::TempDir,
}

#[cfg(feature = "test-utils")]
impl TestDir {
    /// Create a new isolated temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Create a file with the given content and return its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be created or written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.inner.path().join(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
        path
    }
}

#[cfg(feature = "test-utils")]
impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
