use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A validated search query: exactly one alphabetic character, lowercased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query(char);

impl Query {
    /// Normalize and validate raw input.
    ///
    /// Surrounding whitespace is trimmed and the rest lowercased before the
    /// checks run, so `" M "` is accepted as `m`. Lowercasing can lengthen a
    /// string (`'İ'` becomes two chars), which then fails the length check.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let normalized = input.trim().to_lowercase();
        let mut chars = normalized.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Ok(Self(c)),
            _ => Err(CoreError::InvalidQuery {
                input: input.to_owned(),
            }),
        }
    }

    pub fn letter(self) -> char {
        self.0
    }
}

impl FromStr for Query {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
