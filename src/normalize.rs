//! Text cleanup helpers shared by the matching stages.

use regex::{Captures, Regex, RegexBuilder};
use std::sync::LazyLock;

/// Character class treated as word spacing inside titles.
pub const BLANK: &str = r"[\W_]";

static DIRT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_.,\[\]\(\): ]+").expect("Invalid Regex"));

/// Replaces runs of separator dirt (underscores, dots, commas, brackets,
/// parens, colons, spaces) with a single space, trims and lowercases.
#[must_use]
pub fn clean_dirt(s: &str) -> String {
    DIRT_RE.replace_all(s, " ").trim().to_lowercase()
}

/// True when the span does not butt against an alphanumeric character on
/// either side, so `e12` cannot match inside `Some12345`. Underscores and
/// punctuation count as valid boundaries.
pub(crate) fn boundary_ok(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_none_or(|c| !c.is_alphanumeric()) && after.is_none_or(|c| !c.is_alphanumeric())
}

/// Searches as if the pattern were wrapped in negative lookarounds on both
/// sides (the regex engine has no lookaround). Returns the first candidate
/// match whose whole span passes [`boundary_ok`]; spans and capture indices
/// are those of the unwrapped pattern.
pub(crate) fn captures_not_in_word<'t>(re: &Regex, text: &'t str) -> Option<Captures<'t>> {
    re.captures_iter(text).find(|caps| {
        let m = caps.get(0).expect("capture 0 always participates");
        boundary_ok(text, m.start(), m.end())
    })
}

/// Builds a case-insensitive alternation over literal `words`, longest first
/// so `x.264` is preferred over `x264` at the same position.
pub(crate) fn word_set_regex(words: &[&str]) -> Regex {
    let mut sorted: Vec<&str> = words.to_vec();
    sorted.sort_by_key(|w| std::cmp::Reverse(w.len()));
    let pattern = sorted
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&format!("(?:{pattern})"))
        .case_insensitive(true)
        .build()
        .expect("Invalid Regex")
}

/// Removes every boundary-safe occurrence of the word set from `s`,
/// leaving surrounding separators in place.
pub(crate) fn remove_words(s: &str, words_re: &Regex) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for m in words_re.find_iter(s) {
        if boundary_ok(s, m.start(), m.end()) {
            out.push_str(&s[last..m.start()]);
            last = m.end();
        }
    }
    out.push_str(&s[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_dirt() {
        assert_eq!(clean_dirt("Some.Show_[x]:(y), Z"), "some show x y z");
        assert_eq!(clean_dirt("  padded  "), "padded");
    }

    #[test]
    fn test_boundary_rejects_embedded() {
        let re = Regex::new(r"e12").unwrap();
        assert!(captures_not_in_word(&re, "Some12345 e12").is_some());
        assert!(captures_not_in_word(&re, "Some12345").is_none());
        assert!(captures_not_in_word(&re, "pre12post").is_none());
    }

    #[test]
    fn test_boundary_accepts_underscore() {
        let re = Regex::new(r"e12").unwrap();
        assert!(captures_not_in_word(&re, "title_e12_tail").is_some());
    }

    #[test]
    fn test_remove_words() {
        let re = word_set_regex(&["x264", "hdtv"]);
        assert_eq!(remove_words("a.x264.hdtv.b", &re), "a...b");
        // embedded occurrences survive
        assert_eq!(remove_words("ax264b", &re), "ax264b");
    }
}
