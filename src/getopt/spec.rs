//! Option specifications and the lookup table built from them.

use std::fmt;

/// Whether an option consumes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasArg {
    /// Plain flag.
    No,
    /// Argument is mandatory (`-i value`, `-ivalue`, `--input=value`).
    Required,
}

/// A single registered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Long name, matched after `--`.
    pub name: &'static str,
    /// Canonical short flag, matched after `-`.
    pub short: char,
    /// Extra short flags that resolve to this option.
    pub aliases: Vec<char>,
    /// Argument requirement.
    pub has_arg: HasArg,
}

impl OptionSpec {
    /// Option without argument.
    #[must_use]
    pub const fn flag(name: &'static str, short: char) -> Self {
        Self {
            name,
            short,
            aliases: Vec::new(),
            has_arg: HasArg::No,
        }
    }

    /// Option with a required argument.
    #[must_use]
    pub const fn with_argument(name: &'static str, short: char) -> Self {
        Self {
            name,
            short,
            aliases: Vec::new(),
            has_arg: HasArg::Required,
        }
    }

    /// Register an additional short flag for this option.
    #[must_use]
    pub fn alias(mut self, short: char) -> Self {
        self.aliases.push(short);
        self
    }

    /// Returns true if `c` is the short flag or one of the aliases.
    #[must_use]
    pub fn matches_short(&self, c: char) -> bool {
        self.short == c || self.aliases.contains(&c)
    }

    #[must_use]
    pub const fn takes_argument(&self) -> bool {
        matches!(self.has_arg, HasArg::Required)
    }
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}/--{}", self.short, self.name)
    }
}

/// Result of looking up a long option name.
#[derive(Debug, PartialEq, Eq)]
pub enum LongMatch<'t> {
    /// Exact name or a unique prefix.
    Found(&'t OptionSpec),
    /// The prefix matches more than one option.
    Ambiguous(Vec<&'static str>),
    NotFound,
}

/// Ordered, immutable set of options known to the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTable {
    specs: Vec<OptionSpec>,
}

impl OptionTable {
    /// Build a table from explicit specs.
    #[must_use]
    pub const fn new(specs: Vec<OptionSpec>) -> Self {
        Self { specs }
    }

    /// The demo's option set: `help`, `input`, `foo`, `bar`.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            OptionSpec::flag("help", 'h'),
            OptionSpec::with_argument("input", 'i'),
            OptionSpec::flag("foo", 'f'),
            OptionSpec::flag("bar", 'b'),
        ])
    }

    /// Same as [`Self::standard`], with `-?` accepted as an alias for `-h`.
    #[must_use]
    pub fn with_help_alias() -> Self {
        Self::new(vec![
            OptionSpec::flag("help", 'h').alias('?'),
            OptionSpec::with_argument("input", 'i'),
            OptionSpec::flag("foo", 'f'),
            OptionSpec::flag("bar", 'b'),
        ])
    }

    #[must_use]
    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    /// Find the option owning a short flag or alias.
    #[must_use]
    pub fn find_short(&self, c: char) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.matches_short(c))
    }

    /// Find a long option by exact name, falling back to a unique prefix.
    #[must_use]
    pub fn find_long(&self, name: &str) -> LongMatch<'_> {
        if name.is_empty() {
            return LongMatch::NotFound;
        }
        if let Some(spec) = self.specs.iter().find(|spec| spec.name == name) {
            return LongMatch::Found(spec);
        }

        let candidates: Vec<&OptionSpec> = self
            .specs
            .iter()
            .filter(|spec| spec.name.starts_with(name))
            .collect();

        match candidates.as_slice() {
            [] => LongMatch::NotFound,
            [spec] => LongMatch::Found(spec),
            many => LongMatch::Ambiguous(many.iter().map(|spec| spec.name).collect()),
        }
    }

    /// One-line usage summary, e.g. `options: -h -i<file> -f -b`.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            if spec.takes_argument() {
                parts.push(format!("-{}<file>", spec.short));
            } else {
                parts.push(format!("-{}", spec.short));
            }
            for alias in &spec.aliases {
                parts.push(format!("-{alias}"));
            }
        }
        format!("options: {}", parts.join(" "))
    }
}

impl Default for OptionTable {
    fn default() -> Self {
        Self::standard()
    }
}
