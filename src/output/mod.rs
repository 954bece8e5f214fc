//! Encoding-safe console output.
//!
//! Text is UTF-8 inside the crate. Output that may carry non-ASCII data is
//! encoded to UTF-16 and written with the console held in wide mode by a
//! [`ScopedMode`] guard, which puts the previous mode back on every path.

pub mod console;
pub mod encode;
pub mod mode;

use std::ffi::OsStr;

pub use console::WriterConsole;
pub use encode::{ConversionError, from_wide, os_to_wide, to_wide};
pub use mode::{Console, ScopedMode, TextMode};

use crate::error::Result;

/// Print `prefix`, then `value`, then a newline, as wide text.
///
/// `value` is converted before the console is touched, so a conversion
/// failure leaves the mode and the output unchanged. A console already in
/// wide mode is written to directly.
///
/// # Errors
///
/// Returns [`crate::OptError::Conversion`] if `value` is not valid Unicode,
/// or an I/O error from the console.
pub fn print_wide_line<C: Console + ?Sized>(
    console: &mut C,
    prefix: &str,
    value: &OsStr,
) -> Result<()> {
    let mut units = to_wide(prefix);
    units.extend(os_to_wide(value)?);
    units.push(u16::from(b'\n'));

    if console.mode() == TextMode::Wide {
        console.write_wide(&units)?;
        return Ok(());
    }

    let mut wide = ScopedMode::enter(console, TextMode::Wide)?;
    wide.write_wide(&units)?;
    Ok(())
}
