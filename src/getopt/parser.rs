//! The option scanner.
//!
//! Follows GNU `getopt_long` conventions:
//! - short flags may be clustered (`-fb`), the last one may take the rest of
//!   the token as its argument (`-ivalue`)
//! - long options accept `--name value`, `--name=value` and unique prefixes
//! - non-option tokens are skipped and collected as operands
//! - `--` ends option scanning
//!
//! A required argument is always the next token verbatim, even when it
//! starts with `-`, so `-i -f` yields `input` with argument `-f`.

use std::ffi::{OsStr, OsString};
use std::iter::FusedIterator;

use super::error::ParseError;
use super::spec::{HasArg, LongMatch, OptionTable};
use super::{ParseOutcome, ParsedOption};

/// Position inside a `-abc` token.
#[derive(Debug)]
struct Cluster {
    /// Index of the token in `args`.
    token: usize,
    /// Lossy UTF-8 view of the token.
    text: String,
    /// Byte offset of the next flag in `text`.
    pos: usize,
}

/// Lazy option scanner over an argument vector (program name excluded).
#[derive(Debug)]
pub struct Getopt<'t> {
    table: &'t OptionTable,
    args: Vec<OsString>,
    index: usize,
    cluster: Option<Cluster>,
    operands: Vec<OsString>,
    finished: bool,
}

impl<'t> Getopt<'t> {
    #[must_use]
    pub fn new<I, S>(table: &'t OptionTable, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            table,
            args: args.into_iter().map(Into::into).collect(),
            index: 0,
            cluster: None,
            operands: Vec::new(),
            finished: false,
        }
    }

    /// Non-option tokens seen so far. Complete once [`ParseOutcome::End`]
    /// has been returned.
    #[must_use]
    pub fn operands(&self) -> &[OsString] {
        &self.operands
    }

    /// Pull the next outcome.
    pub fn next_outcome(&mut self) -> ParseOutcome {
        if let Some(outcome) = self.next_in_cluster() {
            return outcome;
        }

        while !self.finished {
            let Some(token) = self.args.get(self.index) else {
                self.finished = true;
                break;
            };
            let idx = self.index;
            self.index += 1;

            let text = token.to_string_lossy().into_owned();
            tracing::trace!(index = idx, token = %text, "scanning token");

            if text == "--" {
                self.operands.extend(self.args.drain(self.index..));
                self.finished = true;
                break;
            }

            if text.starts_with("--") {
                return self.parse_long(idx, &text);
            }

            if text.len() > 1 && text.starts_with('-') {
                self.cluster = Some(Cluster {
                    token: idx,
                    text,
                    pos: 1,
                });
                if let Some(outcome) = self.next_in_cluster() {
                    return outcome;
                }
                continue;
            }

            self.operands.push(token.clone());
        }

        ParseOutcome::End
    }

    /// Handle the next character of the current `-abc` cluster.
    fn next_in_cluster(&mut self) -> Option<ParseOutcome> {
        let mut cluster = self.cluster.take()?;
        let c = cluster.text[cluster.pos..].chars().next()?;
        cluster.pos += c.len_utf8();
        let at_end = cluster.pos >= cluster.text.len();

        let table = self.table;
        let Some(spec) = table.find_short(c) else {
            if !at_end {
                self.cluster = Some(cluster);
            }
            return Some(ParseOutcome::Rejected(ParseError::Unrecognized { flag: c }));
        };

        match spec.has_arg {
            HasArg::No => {
                if !at_end {
                    self.cluster = Some(cluster);
                }
                Some(ParseOutcome::Recognized(ParsedOption::flag(spec.short)))
            }
            HasArg::Required if !at_end => {
                let argument = tail(&self.args[cluster.token], &cluster.text, cluster.pos);
                Some(ParseOutcome::Recognized(ParsedOption::with_argument(
                    spec.short, argument,
                )))
            }
            HasArg::Required => Some(match self.take_next_token() {
                Some(argument) => {
                    ParseOutcome::Recognized(ParsedOption::with_argument(spec.short, argument))
                }
                None => ParseOutcome::Rejected(ParseError::MissingArgument {
                    flag: c,
                    long: None,
                }),
            }),
        }
    }

    /// Handle `--name` or `--name=value`; `text` is the lossy view of token `idx`.
    fn parse_long(&mut self, idx: usize, text: &str) -> ParseOutcome {
        let body = &text[2..];
        let (name, inline_offset) = match body.find('=') {
            Some(eq) => (&body[..eq], Some(2 + eq + 1)),
            None => (body, None),
        };

        let table = self.table;
        let spec = match table.find_long(name) {
            LongMatch::Found(spec) => spec,
            LongMatch::Ambiguous(candidates) => {
                return ParseOutcome::Rejected(ParseError::AmbiguousLong {
                    name: name.to_string(),
                    candidates,
                });
            }
            LongMatch::NotFound => {
                return ParseOutcome::Rejected(ParseError::UnrecognizedLong {
                    name: body.to_string(),
                });
            }
        };

        match (spec.has_arg, inline_offset) {
            (HasArg::No, None) => ParseOutcome::Recognized(ParsedOption::flag(spec.short)),
            (HasArg::No, Some(_)) => ParseOutcome::Rejected(ParseError::UnexpectedArgument {
                flag: spec.short,
                long: spec.name,
            }),
            (HasArg::Required, Some(offset)) => {
                let argument = tail(&self.args[idx], text, offset);
                ParseOutcome::Recognized(ParsedOption::with_argument(spec.short, argument))
            }
            (HasArg::Required, None) => match self.take_next_token() {
                Some(argument) => {
                    ParseOutcome::Recognized(ParsedOption::with_argument(spec.short, argument))
                }
                None => ParseOutcome::Rejected(ParseError::MissingArgument {
                    flag: spec.short,
                    long: Some(spec.name),
                }),
            },
        }
    }

    fn take_next_token(&mut self) -> Option<OsString> {
        let token = self.args.get(self.index)?.clone();
        self.index += 1;
        Some(token)
    }
}

impl Iterator for Getopt<'_> {
    type Item = Result<ParsedOption, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_outcome() {
            ParseOutcome::Recognized(option) => Some(Ok(option)),
            ParseOutcome::Rejected(err) => Some(Err(err)),
            ParseOutcome::End => None,
        }
    }
}

impl FusedIterator for Getopt<'_> {}

/// The part of `token` starting at byte `offset` of its lossy view `lossy`.
///
/// Keeps the original OS encoding whenever the prefix maps one-to-one onto
/// the token, so arguments with invalid Unicode survive untouched.
fn tail(token: &OsStr, lossy: &str, offset: usize) -> OsString {
    if let Some(text) = token.to_str() {
        return OsString::from(&text[offset..]);
    }
    let prefix = &lossy[..offset];
    if !prefix.contains(char::REPLACEMENT_CHARACTER) {
        if let Some(native) = native_tail(token, prefix) {
            return native;
        }
    }
    OsString::from(&lossy[offset..])
}

#[cfg(unix)]
fn native_tail(token: &OsStr, prefix: &str) -> Option<OsString> {
    use std::os::unix::ffi::OsStrExt;

    token
        .as_bytes()
        .get(prefix.len()..)
        .map(|rest| OsStr::from_bytes(rest).to_os_string())
}

#[cfg(windows)]
fn native_tail(token: &OsStr, prefix: &str) -> Option<OsString> {
    use std::os::windows::ffi::{OsStrExt, OsStringExt};

    let units: Vec<u16> = token.encode_wide().collect();
    units
        .get(prefix.encode_utf16().count()..)
        .map(OsString::from_wide)
}

#[cfg(not(any(unix, windows)))]
fn native_tail(_token: &OsStr, _prefix: &str) -> Option<OsString> {
    None
}
