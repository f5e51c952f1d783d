//! Detecting titles that are not single-episode releases.
//!
//! Season packs, disc images and `NxAll` bundles match the series name and
//! often carry episode-looking numbers, so they are rejected before any
//! identifier strategy runs.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use tracing::debug;

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("Invalid Regex")
}

static UNWANTED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // 5x0, zero-episode markers
        r"\d{1,3}\s?x\s?0+(?:[^1-9]|$)",
        // S3D1 disc markers
        r"s\d{1,3}d\d{1,3}",
        // 1xAll
        r"\d{1,3}\s?x\s?all",
        r"season(?:s)?\s?\d\s?(?:&\s?\d)?[\s-]*(?:complete|full)",
        r"seasons\s(?:\d\s){2,}",
        r"disc\s\d",
    ]
    .iter()
    .map(|p| compile(p))
    .collect()
});

static SEASON_ONLY: LazyLock<Regex> = LazyLock::new(|| compile(r"seasons?\s?\d{1,2}"));

/// True when the dirt-cleaned title carries a season-pack or disc marker.
pub(crate) fn is_unwanted(data: &str) -> bool {
    for re in UNWANTED.iter() {
        if let Some(m) = re.find(data) {
            debug!(pattern = re.as_str(), marker = m.as_str(), "unwanted marker");
            return true;
        }
    }
    false
}

/// True when the residual still carries a bare `season N` marker, which is
/// too ambiguous for the date, id and sequence strategies.
pub(crate) fn has_season_only_marker(data: &str) -> bool {
    if let Some(m) = SEASON_ONLY.find(data) {
        debug!(marker = m.as_str(), "season-only marker");
        return true;
    }
    false
}
