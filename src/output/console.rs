//! [`Console`] over any byte writer.

use std::io::{self, Write};

use super::encode;
use super::mode::{Console, TextMode};

/// Console backed by an [`io::Write`], stdout in the binary.
///
/// Wide writes are decoded from UTF-16 and emitted through the writer in the
/// platform's native form: UTF-8 bytes on Unix, and on Windows the standard
/// library turns them into `WriteConsoleW` calls when attached to a console.
#[derive(Debug)]
pub struct WriterConsole<W: Write> {
    writer: W,
    native: TextMode,
    mode: TextMode,
}

impl<W: Write> WriterConsole<W> {
    /// Wrap `writer`, starting in its `native` mode.
    pub const fn new(writer: W, native: TextMode) -> Self {
        Self {
            writer,
            native,
            mode: native,
        }
    }

    /// Mode the console started in.
    #[must_use]
    pub const fn native_mode(&self) -> TextMode {
        self.native
    }

    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterConsole<io::Stdout> {
    /// Console on the process's standard output.
    #[must_use]
    pub fn stdout(native: TextMode) -> Self {
        Self::new(io::stdout(), native)
    }
}

fn wrong_mode(expected: TextMode, actual: TextMode) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{expected} write while console is in {actual} mode"),
    )
}

impl<W: Write> Console for WriterConsole<W> {
    fn mode(&self) -> TextMode {
        self.mode
    }

    fn set_mode(&mut self, mode: TextMode) -> io::Result<TextMode> {
        // Pending narrow bytes must not interleave with wide output.
        self.writer.flush()?;
        Ok(std::mem::replace(&mut self.mode, mode))
    }

    fn write_narrow(&mut self, text: &str) -> io::Result<()> {
        if self.mode != TextMode::Narrow {
            return Err(wrong_mode(TextMode::Narrow, self.mode));
        }
        self.writer.write_all(text.as_bytes())
    }

    fn write_wide(&mut self, units: &[u16]) -> io::Result<()> {
        if self.mode != TextMode::Wide {
            return Err(wrong_mode(TextMode::Wide, self.mode));
        }
        let text = encode::from_wide(units)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.writer.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
