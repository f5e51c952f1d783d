//! The season/episode identifier strategy.

use crate::error::ParseError;
use crate::normalize::captures_not_in_word;
use crate::numerals::{ENGLISH_NUMBERS, ROMAN_NUMERAL_PATTERN, english_to_int, roman_to_int};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub(crate) struct EpMatch {
    pub season: u32,
    pub episode: u32,
    pub end_episode: Option<u32>,
    /// Match start within the residual, for the strict-name rule.
    pub start: usize,
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("Invalid Regex")
}

/// Built-in patterns in priority order. Patterns with two or more capture
/// groups yield (season, episode, optional end episode); single-group
/// patterns are seasonless.
static EP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(
            r"(?:series|season|s)\s?(\d{{1,3}})(?:\s(?:.*\s)?)?(?:episode|ep|e|part|pt)\s?(\d{{1,3}}|{ROMAN_NUMERAL_PATTERN})(?:\s?e?(\d{{1,2}}))?"
        ),
        r"(?:series|season)\s?(\d{1,3})\s(\d{1,3})\s?of\s?(?:\d{1,3})".to_string(),
        r"(\d{1,2})\s?x\s?(\d+)(?:\s(\d{1,2}))?".to_string(),
        r"(\d{1,3})\s?of\s?(?:\d{1,3})".to_string(),
        format!(r"(?:episode|ep|part|pt)\s?(\d{{1,3}}|{ROMAN_NUMERAL_PATTERN})"),
        format!(r"part\s({})", ENGLISH_NUMBERS.join("|")),
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

// Recovers 102 / 0102-style numbering when the caller insists on ep mode.
// Known limitation: a three-digit group reads as season 0-9, so it cannot
// represent seasons past 9 unless the title zero-pads to four digits.
static EP_FALLBACK: LazyLock<Regex> = LazyLock::new(|| compile(r"(0?\d)(\d\d)"));

/// Scans `data` with the user regexes (higher priority) followed by the
/// built-ins. A seasonless match with `allow_seasonless` unset ends the
/// whole strategy.
pub(crate) fn parse_episode(
    data: &str,
    user: &[Regex],
    allow_seasonless: bool,
) -> Result<Option<EpMatch>, ParseError> {
    for re in user.iter().chain(EP_PATTERNS.iter()) {
        let Some(caps) = captures_not_in_word(re, data) else {
            continue;
        };
        debug!(pattern = re.as_str(), "episode pattern matched");

        let declared_groups = re.captures_len() - 1;
        let (season, episode_text) = if declared_groups >= 2 {
            let season_text = caps.get(1).map_or("", |m| m.as_str());
            let Ok(season) = season_text.parse::<u32>() else {
                return Err(ParseError::InvalidEpisodeNumber(season_text.to_string()));
            };
            (season, caps.get(2).map_or("", |m| m.as_str()))
        } else if allow_seasonless {
            // assume season 1 when the pattern carries no season at all
            (1, caps.get(1).map_or("", |m| m.as_str()))
        } else {
            debug!("seasonless match rejected");
            return Ok(None);
        };

        let episode = episode_number(episode_text)?;

        let mut end_episode = None;
        if declared_groups >= 3 {
            if let Some(end) = caps.get(3) {
                let Ok(end) = end.as_str().parse::<u32>() else {
                    return Err(ParseError::InvalidEpisodeNumber(end.as_str().to_string()));
                };
                // an end before the start, or a span past ten episodes, is
                // not a believable two-part pack
                if end > episode && end <= episode + 10 {
                    end_episode = Some(end);
                }
            }
        }

        let start = caps.get(0).expect("capture 0 always participates").start();
        return Ok(Some(EpMatch {
            season,
            episode,
            end_episode,
            start,
        }));
    }
    Ok(None)
}

/// The `ep`-mode-only fallback for `NNN` / `NNNN` numbering.
pub(crate) fn parse_fallback(data: &str) -> Option<EpMatch> {
    let caps = captures_not_in_word(&EP_FALLBACK, data)?;
    let season = caps.get(1)?.as_str().parse().ok()?;
    let episode = caps.get(2)?.as_str().parse().ok()?;
    Some(EpMatch {
        season,
        episode,
        end_episode: None,
        start: caps.get(0)?.start(),
    })
}

fn episode_number(text: &str) -> Result<u32, ParseError> {
    if text.chars().all(|c| c.is_ascii_digit()) && !text.is_empty() {
        return text
            .parse()
            .map_err(|_| ParseError::InvalidEpisodeNumber(text.to_string()));
    }
    if let Some(n) = english_to_int(text) {
        return Ok(n);
    }
    roman_to_int(text)
}
