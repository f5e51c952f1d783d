//! Locating the series name inside a release title.

use crate::normalize::{BLANK, clean_dirt};
use crate::vocabulary::IGNORE_PREFIXES;
use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Byte span of the matched series name within the original data.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NameMatch {
    pub start: usize,
    pub end: usize,
}

/// Synthesizes a regex for `name`: separator runs are tolerated between
/// words, `&` and `and` are interchangeable, and an ignored prefix such as a
/// `[group]` tag may precede the name. The name itself is capture group 1
/// and must be followed by at least one blank.
pub(crate) fn name_to_regex(name: &str) -> Regex {
    let cleaned = clean_dirt(name);
    let core = cleaned
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(word_pattern)
        .collect::<Vec<_>>()
        .join(&format!("{BLANK}*"));
    let ignore = format!("(?:{})?", IGNORE_PREFIXES.join("|"));
    let pattern = format!("^{ignore}{BLANK}*({core}){BLANK}+");
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .expect("Invalid Regex")
}

fn word_pattern(word: &str) -> String {
    let escaped = regex::escape(word).replace(r"\&", "&");
    if escaped == "and" || escaped == "&" {
        "(?:and|&)".to_string()
    } else {
        escaped.replace('&', "(?:and|&)")
    }
}

/// Runs the name regexes against `data` in order. With `from_name` the span
/// is capture group 1 (the synthesized pattern); user regexes count their
/// whole match as the name.
pub(crate) fn locate(data: &str, regexps: &[Regex], from_name: bool) -> Option<NameMatch> {
    for re in regexps {
        if let Some(caps) = re.captures(data) {
            let m = if from_name { caps.get(1) } else { caps.get(0) };
            if let Some(m) = m {
                debug!(pattern = re.as_str(), "name matched");
                return Some(NameMatch {
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
    }
    debug!("name regexes did not match");
    None
}
