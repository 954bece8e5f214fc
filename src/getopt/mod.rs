//! getopt_long-style option scanning.
//!
//! [`OptionTable`] holds the registered options; [`Getopt`] walks an argument
//! vector and yields one [`ParseOutcome`] per option occurrence, in order.
//!
//! ```rust,ignore
//! use optdemo::getopt::{Getopt, OptionTable, ParseOutcome};
//!
//! let table = OptionTable::standard();
//! let mut opts = Getopt::new(&table, ["-fb", "--input", "notes.txt"]);
//! loop {
//!     match opts.next_outcome() {
//!         ParseOutcome::Recognized(opt) => println!("{}", opt.flag),
//!         ParseOutcome::Rejected(err) => eprintln!("{err}"),
//!         ParseOutcome::End => break,
//!     }
//! }
//! ```

pub mod error;
pub mod parser;
pub mod spec;

use std::ffi::{OsStr, OsString};

pub use error::ParseError;
pub use parser::Getopt;
pub use spec::{HasArg, LongMatch, OptionSpec, OptionTable};

/// One recognized option occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOption {
    /// Canonical short flag of the matched option (aliases are resolved).
    pub flag: char,
    /// Argument for options declared with [`HasArg::Required`].
    pub argument: Option<OsString>,
}

impl ParsedOption {
    #[must_use]
    pub const fn flag(flag: char) -> Self {
        Self {
            flag,
            argument: None,
        }
    }

    #[must_use]
    pub fn with_argument(flag: char, argument: impl Into<OsString>) -> Self {
        Self {
            flag,
            argument: Some(argument.into()),
        }
    }

    #[must_use]
    pub fn argument(&self) -> Option<&OsStr> {
        self.argument.as_deref()
    }
}

/// Result of pulling the next item from a [`Getopt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Recognized(ParsedOption),
    Rejected(ParseError),
    /// Input exhausted. Repeats on every later call.
    End,
}

impl ParseOutcome {
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }
}

/// Parse every option up front; convenient for tests and small callers.
#[must_use]
pub fn parse_all<I, S>(table: &OptionTable, args: I) -> Vec<ParseOutcome>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut opts = Getopt::new(table, args);
    let mut outcomes = Vec::new();
    loop {
        let outcome = opts.next_outcome();
        let end = outcome.is_end();
        outcomes.push(outcome);
        if end {
            return outcomes;
        }
    }
}
