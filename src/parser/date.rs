//! The airdate identifier strategy.
//!
//! A matched date is ambiguous: `05-06-2011` can be May or June depending on
//! locale. Every interpretation allowed by the caller's dayfirst/yearfirst
//! settings is tried as a real calendar date; interpretations in the future
//! are discarded and the most recent survivor wins.

use crate::normalize::captures_not_in_word;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

const SEPARATORS: &str = "[!/+,:;|~ x-]";

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"(\d{{2,4}}){SEPARATORS}(\d{{1,2}}){SEPARATORS}(\d{{1,2}})"),
        format!(r"(\d{{1,2}}){SEPARATORS}(\d{{1,2}}){SEPARATORS}(\d{{2,4}})"),
    ]
    .iter()
    .map(|p| {
        RegexBuilder::new(p)
            .case_insensitive(true)
            .build()
            .expect("Invalid Regex")
    })
    .collect()
});

#[derive(Debug, Clone)]
pub(crate) struct DateMatch {
    pub date: NaiveDate,
    /// Raw capture groups, exposed so callers can re-interpret ambiguous
    /// dates themselves.
    pub groups: Vec<String>,
    /// Match start within the residual, for the strict-name rule.
    pub start: usize,
}

/// Scans `data` for an airdate with the user regexes (higher priority)
/// followed by the built-ins. Only the first boundary-valid match of each
/// regex is considered; when all of its interpretations are invalid or in
/// the future, the next regex gets its turn.
pub(crate) fn parse_date(
    data: &str,
    user: &[Regex],
    dayfirst: Option<bool>,
    yearfirst: Option<bool>,
    now: NaiveDateTime,
) -> Option<DateMatch> {
    let dayfirst_opts = dayfirst.map_or_else(|| vec![true, false], |v| vec![v]);
    let yearfirst_opts = yearfirst.map_or_else(|| vec![true, false], |v| vec![v]);

    for re in user.iter().chain(DATE_PATTERNS.iter()) {
        let Some(caps) = captures_not_in_word(re, data) else {
            continue;
        };
        let m = caps.get(0).expect("capture 0 always participates");

        let parts: Vec<&str> = m
            .as_str()
            .split(|c: char| !c.is_ascii_digit())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 3 {
            debug!(text = m.as_str(), "match does not split into three numbers");
            continue;
        }

        let mut candidates: Vec<NaiveDate> = Vec::new();
        for &df in &dayfirst_opts {
            for &yf in &yearfirst_opts {
                let Some(date) = interpret(&parts, df, yf, now) else {
                    continue;
                };
                // no airdate more than a day in the future
                if date.and_time(NaiveTime::MIN) > now + Duration::days(1) {
                    continue;
                }
                if !candidates.contains(&date) {
                    candidates.push(date);
                }
            }
        }
        if candidates.is_empty() {
            debug!(text = m.as_str(), "no valid past interpretation");
            continue;
        }
        candidates.sort_unstable();
        let date = *candidates.last().expect("candidates is non-empty");

        let groups = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|g| g.as_str().to_string())
            .collect();
        debug!(%date, "date matched");
        return Some(DateMatch {
            date,
            groups,
            start: m.start(),
        });
    }
    None
}

/// Resolves three numeric fields to a calendar date. A 3-4 digit field is
/// always the year; otherwise `yearfirst` decides which end holds the year
/// and `dayfirst` the order of the remaining two.
fn interpret(parts: &[&str], dayfirst: bool, yearfirst: bool, now: NaiveDateTime) -> Option<NaiveDate> {
    let (a, b, c) = (parts[0], parts[1], parts[2]);
    let (year_text, rest) = if a.len() >= 3 {
        (a, (b, c))
    } else if c.len() >= 3 {
        (c, (a, b))
    } else if yearfirst {
        (a, (b, c))
    } else {
        (c, (a, b))
    };
    let (day_text, month_text) = if dayfirst {
        (rest.0, rest.1)
    } else {
        (rest.1, rest.0)
    };

    let year = expand_year(year_text.parse().ok()?, now.year());
    let month: u32 = month_text.parse().ok()?;
    let day: u32 = day_text.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Expands a two-digit year into the century nearest `now_year`.
fn expand_year(year: i32, now_year: i32) -> i32 {
    if year >= 100 {
        return year;
    }
    let mut expanded = now_year / 100 * 100 + year;
    if expanded > now_year + 50 {
        expanded -= 100;
    } else if expanded < now_year - 50 {
        expanded += 100;
    }
    expanded
}
