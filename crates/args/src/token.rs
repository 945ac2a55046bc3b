//! Classification of single directive arguments.
//!
//! A directive argument is either a long option (`--name` or
//! `--name=value`), the end-of-options marker `--`, something that
//! merely looks like an option (`-x`), or a positional argument.

use crate::{OPTION_PREFIX, VALUE_SEPARATOR};

/// One directive argument after classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A long option, possibly carrying an inline value.
    Option(OptionToken<'a>),
    /// A bare `--`; all following arguments are positional.
    EndOfOptions,
    /// A single-dash switch such as `-x`.  No directive declares short
    /// options, so these are always rejected by the caller.
    Short(&'a str),
    /// A bare argument such as a mount point.
    Positional(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a single argument.
    pub fn classify(input: &'a str) -> Self {
        if input == OPTION_PREFIX {
            Self::EndOfOptions
        } else if input.starts_with(OPTION_PREFIX) {
            Self::Option(OptionToken::parse(input))
        } else if input.len() > 1 && input.starts_with('-') {
            Self::Short(input)
        } else {
            Self::Positional(input)
        }
    }
}

/// A long option argument, split into its spelling and optional inline value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionToken<'a> {
    /// The option spelling including the leading dashes, e.g. `--ondisk`
    spelling: &'a str,
    /// The inline value, if the argument was written as `--name=value`
    value: Option<&'a str>,
}

impl<'a> OptionToken<'a> {
    /// Split an argument that starts with `--` into spelling and value.
    ///
    /// Only the first `=` separates the two; anything after it belongs
    /// to the value.  Shell quoting has already been removed by
    /// [`crate::line::split`], so the value is kept exactly as written,
    /// including any whitespace or quote characters it contains.
    pub fn parse(input: &'a str) -> Self {
        match input.split_once(VALUE_SEPARATOR) {
            None => Self {
                spelling: input,
                value: None,
            },
            Some((spelling, value)) => Self {
                spelling,
                value: Some(value),
            },
        }
    }

    /// Returns the spelling, including leading dashes.
    pub fn spelling(&self) -> &'a str {
        self.spelling
    }

    /// Returns the spelling without its leading dashes.
    pub fn name(&self) -> &'a str {
        self.spelling
            .strip_prefix(OPTION_PREFIX)
            .unwrap_or(self.spelling)
    }

    /// Returns the inline value, if any.
    pub fn value(&self) -> Option<&'a str> {
        self.value
    }
}
