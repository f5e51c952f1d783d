//! The sequence and opaque-id identifier strategies.

use crate::error::ParseError;
use crate::normalize::captures_not_in_word;
use crate::numerals::{ROMAN_NUMERAL_PATTERN, roman_to_int};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("Invalid Regex")
}

static SEQUENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(?:pt|part)\s?(\d+|{ROMAN_NUMERAL_PATTERN})"),
        // anime-style absolute numbering with an optional version tag
        r"(\d{1,3})(?:v(?P<version>\d))?".to_string(),
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

static ID_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| vec![compile(r"(\d{4})x(\d+)\W(\d+)")]);

#[derive(Debug, Clone, Copy)]
pub(crate) struct SequenceMatch {
    pub number: u32,
    /// Anime `vN` tag; `v3` means the second revision of the episode.
    pub version: Option<u32>,
    pub start: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct IdMatch {
    pub id: String,
    pub start: usize,
}

/// Scans `data` for an absolute sequence number, user regexes first.
pub(crate) fn parse_sequence(
    data: &str,
    user: &[Regex],
) -> Result<Option<SequenceMatch>, ParseError> {
    for re in user.iter().chain(SEQUENCE_PATTERNS.iter()) {
        let Some(caps) = captures_not_in_word(re, data) else {
            continue;
        };
        let Some(group) = caps.get(1) else {
            continue;
        };
        let text = group.as_str();
        let number = if text.chars().all(|c| c.is_ascii_digit()) {
            match text.parse::<u32>() {
                Ok(n) => n,
                // absurdly long digit runs are noise, not part numbers
                Err(_) => continue,
            }
        } else {
            roman_to_int(text)?
        };
        let version = caps.name("version").and_then(|v| v.as_str().parse().ok());
        debug!(pattern = re.as_str(), number, "sequence matched");
        return Ok(Some(SequenceMatch {
            number,
            version,
            start: caps.get(0).expect("capture 0 always participates").start(),
        }));
    }
    Ok(None)
}

/// Scans `data` for an opaque id; the matched groups joined with `-` become
/// the identifier.
pub(crate) fn parse_id(data: &str, user: &[Regex]) -> Option<IdMatch> {
    for re in user.iter().chain(ID_PATTERNS.iter()) {
        let Some(caps) = captures_not_in_word(re, data) else {
            continue;
        };
        let id = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join("-");
        if id.is_empty() {
            continue;
        }
        debug!(pattern = re.as_str(), id = %id, "id matched");
        return Some(IdMatch {
            id,
            start: caps.get(0).expect("capture 0 always participates").start(),
        });
    }
    None
}
