//! Conversions between the internal UTF-8 text and wide (UTF-16) units.

use std::ffi::OsStr;

use thiserror::Error;

/// An OS string that cannot be represented as Unicode text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert '{lossy}' to wide characters: not valid Unicode")]
pub struct ConversionError {
    /// Lossy rendering of the offending input, for diagnostics.
    pub lossy: String,
}

/// Encode UTF-8 text as UTF-16 code units.
#[must_use]
pub fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Convert an OS string (e.g. a command-line argument) to UTF-16 units.
///
/// # Errors
///
/// Returns [`ConversionError`] if `value` is not valid Unicode.
pub fn os_to_wide(value: &OsStr) -> Result<Vec<u16>, ConversionError> {
    value.to_str().map(to_wide).ok_or_else(|| ConversionError {
        lossy: value.to_string_lossy().into_owned(),
    })
}

/// Decode UTF-16 units back into UTF-8 text.
///
/// # Errors
///
/// Returns [`ConversionError`] on unpaired surrogates.
pub fn from_wide(units: &[u16]) -> Result<String, ConversionError> {
    String::from_utf16(units).map_err(|_| ConversionError {
        lossy: String::from_utf16_lossy(units),
    })
}
