//! Errors produced while scanning argument tokens.

use thiserror::Error;

/// A token the parser could not accept.
///
/// The `Display` text follows GNU getopt's diagnostics, minus the program
/// name prefix which the caller adds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Short flag not present in the table.
    #[error("invalid option -- '{flag}'")]
    Unrecognized { flag: char },

    /// Long option not present in the table.
    #[error("unrecognized option '--{name}'")]
    UnrecognizedLong { name: String },

    /// Option needs an argument and none is left.
    #[error("{}", missing_argument_message(.flag, .long))]
    MissingArgument {
        flag: char,
        /// Set when the option was spelled in long form.
        long: Option<&'static str>,
    },

    /// Long prefix matches several options.
    #[error("option '--{name}' is ambiguous; possibilities: {}", format_candidates(.candidates))]
    AmbiguousLong {
        name: String,
        candidates: Vec<&'static str>,
    },

    /// `--name=value` given for an option without argument.
    #[error("option '--{long}' doesn't allow an argument")]
    UnexpectedArgument { flag: char, long: &'static str },
}

impl ParseError {
    /// The offending short character, when the error is tied to one.
    #[must_use]
    pub const fn flag(&self) -> Option<char> {
        match self {
            Self::Unrecognized { flag }
            | Self::MissingArgument { flag, .. }
            | Self::UnexpectedArgument { flag, .. } => Some(*flag),
            Self::UnrecognizedLong { .. } | Self::AmbiguousLong { .. } => None,
        }
    }

    /// Stable code for programmatic handling.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unrecognized { .. } => "OPTD-P001",
            Self::UnrecognizedLong { .. } => "OPTD-P002",
            Self::MissingArgument { .. } => "OPTD-P003",
            Self::AmbiguousLong { .. } => "OPTD-P004",
            Self::UnexpectedArgument { .. } => "OPTD-P005",
        }
    }

    /// True for the `-?` case that deserves a `--help` hint.
    #[must_use]
    pub const fn is_question_mark(&self) -> bool {
        matches!(self, Self::Unrecognized { flag: '?' })
    }
}

fn missing_argument_message(flag: &char, long: &Option<&'static str>) -> String {
    match long {
        Some(name) => format!("option '--{name}' requires an argument"),
        None => format!("option requires an argument -- '{flag}'"),
    }
}

fn format_candidates(candidates: &[&'static str]) -> String {
    candidates
        .iter()
        .map(|name| format!("'--{name}'"))
        .collect::<Vec<_>>()
        .join(" ")
}
