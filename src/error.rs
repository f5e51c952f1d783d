//! Error and warning types for title parsing.
//!
//! An invalid parse is a normal negative outcome and is represented in
//! [`ParseResult`](crate::ParseResult), not here. The types in this module
//! cover the two remaining cases: genuine programmer errors ([`ParseError`])
//! and the structured "looks like the series but has no numbering" finding
//! ([`ParseWarning`]).

use serde::Serialize;
use thiserror::Error;

/// Fatal errors. These indicate misuse of the library or corrupt
/// configuration, never a title that merely failed to parse.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("series name is empty")]
    EmptyName,

    #[error("release title is empty")]
    EmptyData,

    #[error("invalid user regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A strategy regex admitted a roman numeral the decoder cannot
    /// represent. The built-in patterns stop at XXXIX, so this can only
    /// happen through a broken user regex.
    #[error("`{0}` is not a valid roman numeral")]
    InvalidRomanNumeral(String),

    /// A user regex captured something that is neither a number, an English
    /// episode word nor a roman numeral where an episode number was expected.
    #[error("invalid episode number `{0}`")]
    InvalidEpisodeNumber(String),
}

/// Classification of a [`ParseWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The series name matched but no episode, date, id or sequence
    /// numbering could be located and the title is not a special.
    NoIdentifier,
}

/// Non-fatal finding attached to an invalid [`ParseResult`](crate::ParseResult).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub kind: WarningKind,
    pub message: String,
    /// The offending release title, verbatim.
    pub data: String,
}

impl ParseWarning {
    pub(crate) fn no_identifier(name: &str, data: &str) -> Self {
        Self {
            kind: WarningKind::NoIdentifier,
            message: format!(
                "title `{data}` looks like series `{name}` but has no recognizable episode or id numbering"
            ),
            data: data.to_string(),
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
