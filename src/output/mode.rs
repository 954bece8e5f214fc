//! Console text modes and the scoped mode switch.

use std::fmt;
use std::io;
use std::ops::{Deref, DerefMut};

use super::encode;

/// How a console expects text to arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextMode {
    /// Single-byte code units (UTF-8 bytes on this crate's side).
    #[default]
    Narrow,
    /// UTF-16 code units.
    Wide,
}

impl TextMode {
    /// Parse from a config or env value (case-insensitive).
    #[must_use]
    pub fn from_arg(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "narrow" | "ansi" | "byte" => Some(Self::Narrow),
            "wide" | "utf16" | "utf-16" | "unicode" => Some(Self::Wide),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text sink with a switchable narrow/wide mode.
///
/// Implementations reject narrow writes while in wide mode and the other
/// way round, so a forgotten restore shows up as an error instead of
/// garbled output.
pub trait Console {
    /// Current mode.
    fn mode(&self) -> TextMode;

    /// Switch to `mode`, returning the previous mode.
    fn set_mode(&mut self, mode: TextMode) -> io::Result<TextMode>;

    /// Write UTF-8 text. Only valid in [`TextMode::Narrow`].
    fn write_narrow(&mut self, text: &str) -> io::Result<()>;

    /// Write UTF-16 units. Only valid in [`TextMode::Wide`].
    fn write_wide(&mut self, units: &[u16]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Write text using whichever path matches the current mode.
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        match self.mode() {
            TextMode::Narrow => self.write_narrow(text),
            TextMode::Wide => self.write_wide(&encode::to_wide(text)),
        }
    }

    /// [`Console::write_text`] followed by a newline.
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write_text(&format!("{text}\n"))
    }
}

/// Holds a console in a given mode; the previous mode comes back on drop.
///
/// ```rust,ignore
/// let mut wide = ScopedMode::enter(&mut console, TextMode::Wide)?;
/// wide.write_wide(&units)?;
/// // mode restored here, also on early return
/// ```
pub struct ScopedMode<'c, C: Console + ?Sized> {
    console: &'c mut C,
    prior: TextMode,
}

impl<'c, C: Console + ?Sized> ScopedMode<'c, C> {
    /// Switch `console` to `mode` for the lifetime of the guard.
    ///
    /// # Errors
    ///
    /// Returns the console's error if the switch fails; nothing is restored
    /// in that case because nothing changed.
    pub fn enter(console: &'c mut C, mode: TextMode) -> io::Result<Self> {
        let prior = console.set_mode(mode)?;
        tracing::trace!(%prior, %mode, "console mode switched");
        Ok(Self { console, prior })
    }

    /// Mode that will be restored.
    #[must_use]
    pub const fn prior(&self) -> TextMode {
        self.prior
    }
}

impl<C: Console + ?Sized> Deref for ScopedMode<'_, C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        self.console
    }
}

impl<C: Console + ?Sized> DerefMut for ScopedMode<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.console
    }
}

impl<C: Console + ?Sized> Drop for ScopedMode<'_, C> {
    fn drop(&mut self) {
        match self.console.set_mode(self.prior) {
            Ok(_) => tracing::trace!(restored = %self.prior, "console mode restored"),
            Err(err) => tracing::warn!(error = %err, "failed to restore console mode"),
        }
    }
}
