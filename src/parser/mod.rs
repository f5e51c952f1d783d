//! Release-title parsing: input configuration, result model and the parse
//! pipeline.

mod date;
mod episode;
mod name;
mod sequence;
mod unwanted;

use crate::error::{ParseError, ParseWarning};
use crate::normalize::{self, clean_dirt};
use crate::quality::{self, Quality};
use crate::vocabulary;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::LazyLock;
use tracing::debug;

/// Episode numbering scheme the caller expects. `Auto` tries every strategy
/// in the fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdMode {
    Ep,
    Date,
    Sequence,
    Id,
    #[default]
    Auto,
}

impl IdMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ep => "ep",
            Self::Date => "date",
            Self::Sequence => "sequence",
            Self::Id => "id",
            Self::Auto => "auto",
        }
    }
}

impl std::fmt::Display for IdMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IdMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ep" => Ok(Self::Ep),
            "date" => Ok(Self::Date),
            "sequence" => Ok(Self::Sequence),
            "id" => Ok(Self::Id),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown mode `{other}` (expected ep, date, sequence, id or auto)"
            )),
        }
    }
}

/// Kind of identifier found in a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    Ep,
    Date,
    Sequence,
    Id,
    Special,
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ep => "ep",
            Self::Date => "date",
            Self::Sequence => "sequence",
            Self::Id => "id",
            Self::Special => "special",
        };
        write!(f, "{s}")
    }
}

/// The structured identifier extracted from a title, one arm per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeId {
    Episode {
        season: u32,
        episode: u32,
        end_episode: Option<u32>,
    },
    Date(NaiveDate),
    Sequence(u32),
    Opaque(String),
    Special(String),
}

impl EpisodeId {
    #[must_use]
    pub const fn kind(&self) -> IdKind {
        match self {
            Self::Episode { .. } => IdKind::Ep,
            Self::Date(_) => IdKind::Date,
            Self::Sequence(_) => IdKind::Sequence,
            Self::Opaque(_) => IdKind::Id,
            Self::Special(_) => IdKind::Special,
        }
    }

    /// The canonical identifier string: `S01E02` for episodes,
    /// `YYYY-MM-DD` for dates, the raw value otherwise.
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Self::Episode {
                season, episode, ..
            } => format!("S{season:02}E{episode:02}"),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::Sequence(n) => n.to_string(),
            Self::Opaque(id) | Self::Special(id) => id.clone(),
        }
    }
}

/// Immutable parse configuration, built once per series/title pair.
#[derive(Debug, Clone)]
pub struct ParseInput {
    name: String,
    data: String,
    mode: IdMode,
    strict_name: bool,
    allow_seasonless: bool,
    allow_groups: Vec<String>,
    date_dayfirst: Option<bool>,
    date_yearfirst: Option<bool>,
    name_regexps: Vec<String>,
    ep_regexps: Vec<String>,
    date_regexps: Vec<String>,
    sequence_regexps: Vec<String>,
    id_regexps: Vec<String>,
    quality_hint: Option<Quality>,
    now: Option<NaiveDateTime>,
}

impl ParseInput {
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            mode: IdMode::Auto,
            strict_name: false,
            allow_seasonless: true,
            allow_groups: Vec::new(),
            date_dayfirst: None,
            date_yearfirst: None,
            name_regexps: Vec::new(),
            ep_regexps: Vec::new(),
            date_regexps: Vec::new(),
            sequence_regexps: Vec::new(),
            id_regexps: Vec::new(),
            quality_hint: None,
            now: None,
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: IdMode) -> Self {
        self.mode = mode;
        self
    }

    /// Require the identifier to follow the matched name almost immediately.
    #[must_use]
    pub fn strict_name(mut self, strict: bool) -> Self {
        self.strict_name = strict;
        self
    }

    /// When unset, ep patterns yielding only an episode number are rejected.
    #[must_use]
    pub fn allow_seasonless(mut self, allow: bool) -> Self {
        self.allow_seasonless = allow;
        self
    }

    /// Accept only releases from one of these groups (matched as `[group]`
    /// or `-group` outside the name).
    #[must_use]
    pub fn allow_groups(mut self, groups: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.allow_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict ambiguous dates to day-first interpretation.
    #[must_use]
    pub fn date_dayfirst(mut self, dayfirst: bool) -> Self {
        self.date_dayfirst = Some(dayfirst);
        self
    }

    /// Restrict ambiguous dates to year-first interpretation.
    #[must_use]
    pub fn date_yearfirst(mut self, yearfirst: bool) -> Self {
        self.date_yearfirst = Some(yearfirst);
        self
    }

    /// Replace the synthesized name regex. The whole match counts as the
    /// name span.
    #[must_use]
    pub fn name_regexps(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.name_regexps = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Extra ep patterns, tried before the built-ins.
    #[must_use]
    pub fn ep_regexps(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.ep_regexps = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Extra date patterns, tried before the built-ins.
    #[must_use]
    pub fn date_regexps(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.date_regexps = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Extra sequence patterns, tried before the built-ins.
    #[must_use]
    pub fn sequence_regexps(
        mut self,
        patterns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.sequence_regexps = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Extra id patterns, tried before the built-ins.
    #[must_use]
    pub fn id_regexps(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.id_regexps = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Use an already-known quality instead of scanning for one.
    #[must_use]
    pub fn quality_hint(mut self, quality: Quality) -> Self {
        self.quality_hint = Some(quality);
        self
    }

    /// Inject the clock used by the date strategy's future-sanity test.
    #[must_use]
    pub fn now(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }
}

/// Outcome of parsing one title. An invalid result (`id == None`) is a
/// normal negative outcome; all other fields still reflect whatever was
/// extracted before the parse gave up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub id: Option<EpisodeId>,
    pub quality: Quality,
    pub proper_count: u32,
    pub special: bool,
    pub group: Option<String>,
    /// Raw regex groups of a date match, for downstream disambiguation.
    pub id_groups: Option<Vec<String>>,
    pub warning: Option<ParseWarning>,
}

impl Default for ParseResult {
    fn default() -> Self {
        Self {
            id: None,
            quality: Quality::UNKNOWN,
            proper_count: 0,
            special: false,
            group: None,
            id_groups: None,
            warning: None,
        }
    }
}

impl ParseResult {
    #[must_use]
    pub const fn valid(&self) -> bool {
        self.id.is_some()
    }

    #[must_use]
    pub fn id_kind(&self) -> Option<IdKind> {
        self.id.as_ref().map(EpisodeId::kind)
    }

    #[must_use]
    pub fn season(&self) -> Option<u32> {
        match self.id.as_ref()? {
            EpisodeId::Episode { season, .. } => Some(*season),
            EpisodeId::Sequence(_) => Some(0),
            _ => None,
        }
    }

    #[must_use]
    pub fn episode(&self) -> Option<u32> {
        match self.id.as_ref()? {
            EpisodeId::Episode { episode, .. } => Some(*episode),
            EpisodeId::Sequence(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn end_episode(&self) -> Option<u32> {
        match self.id.as_ref()? {
            EpisodeId::Episode { end_episode, .. } => *end_episode,
            _ => None,
        }
    }

    /// Canonical identifier string, or `None` while invalid.
    #[must_use]
    pub fn identifier(&self) -> Option<String> {
        self.id.as_ref().map(EpisodeId::identifier)
    }

    #[must_use]
    pub const fn proper(&self) -> bool {
        self.proper_count > 0
    }
}

/// Orders two results by release priority: quality rank first, proper count
/// as the tie-break. `Greater` means `a` is the better release.
#[must_use]
pub fn compare_release_priority(a: &ParseResult, b: &ParseResult) -> Ordering {
    match b.quality.rank.cmp(&a.quality.rank) {
        Ordering::Equal => a.proper_count.cmp(&b.proper_count),
        ordering => ordering,
    }
}

static SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\W_]+").expect("Invalid Regex"));

/// Words stripped from the residual before identifier matching: nuisance
/// words, every quality tag name, codecs and sound tags.
static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    let words: Vec<&str> = vocabulary::REMOVE
        .iter()
        .copied()
        .chain(quality::names())
        .chain(vocabulary::CODECS.iter().copied())
        .chain(vocabulary::SOUNDS.iter().copied())
        .collect();
    normalize::word_set_regex(&words)
});

fn compile_user(patterns: &[String]) -> Result<Vec<Regex>, ParseError> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|e| ParseError::InvalidRegex {
                    pattern: p.clone(),
                    source: Box::new(e),
                })
        })
        .collect()
}

/// Parses one release title against the configured series.
///
/// Returns `Err` only for programmer errors (empty inputs, malformed user
/// regexes, numerals a regex should never have admitted). A title that does
/// not represent a single identifiable episode comes back as a valid `Ok`
/// with `ParseResult::valid() == false`.
pub fn parse(input: &ParseInput) -> Result<ParseResult, ParseError> {
    if input.name.trim().is_empty() {
        return Err(ParseError::EmptyName);
    }
    if input.data.trim().is_empty() {
        return Err(ParseError::EmptyData);
    }

    let mut result = ParseResult::default();

    // season packs, discs and the like are never single episodes
    if unwanted::is_unwanted(&clean_dirt(&input.data)) {
        return Ok(result);
    }

    // locate the series name
    let user_name = compile_user(&input.name_regexps)?;
    let name_match = if user_name.is_empty() {
        let re = name::name_to_regex(&input.name);
        name::locate(&input.data, std::slice::from_ref(&re), true)
    } else {
        name::locate(&input.data, &user_name, false)
    };
    let Some(nm) = name_match else {
        return Ok(result);
    };

    // rotate the remainder around the name span and lowercase it
    let mut data_stripped = format!("{} {}", &input.data[nm.end..], &input.data[..nm.start])
        .to_lowercase();
    debug!(data = %data_stripped, "data stripped");

    // release-group allow-list
    if !input.allow_groups.is_empty() {
        let mut found = None;
        'groups: for group in &input.allow_groups {
            let group = group.to_lowercase();
            for marker in [format!("[{group}]"), format!("-{group}")] {
                if data_stripped.contains(&marker) {
                    data_stripped = data_stripped.replace(&marker, "");
                    found = Some(group);
                    break 'groups;
                }
            }
        }
        let Some(group) = found else {
            debug!(groups = ?input.allow_groups, "no allowed group marker");
            return Ok(result);
        };
        debug!(group = %group, "group matched");
        result.group = Some(group);
    }

    // quality, unless the caller already knows it
    match input.quality_hint {
        Some(hint) if !hint.is_unknown() => result.quality = hint,
        _ => {
            let (found, remaining) = quality::quality_match(&data_stripped);
            result.quality = found;
            if let Some(remaining) = remaining {
                data_stripped = remaining;
            }
        }
    }

    // strip quality names, codecs, sounds and nuisance words
    let data_stripped = normalize::remove_words(&data_stripped, &STRIP_RE);

    // count propers and flag specials, then normalize separators to spaces
    let mut kept: Vec<&str> = Vec::new();
    for part in SPLIT_RE.split(&data_stripped) {
        if part.is_empty() {
            continue;
        }
        if vocabulary::PROPERS.contains(&part) {
            result.proper_count += 1;
        } else if vocabulary::SPECIALS.contains(&part) {
            result.special = true;
        } else {
            kept.push(part);
        }
    }
    let data_stripped = kept.join(" ");
    debug!(data = %data_stripped, "data for identifier matching");

    run_strategies(input, nm.end, &data_stripped, &mut result)?;
    Ok(result)
}

/// Runs the identifier strategies in the fixed order; the first success
/// fills `result.id` and wins. A strict-name violation leaves the result
/// invalid without trying further strategies.
fn run_strategies(
    input: &ParseInput,
    name_end: usize,
    data: &str,
    result: &mut ParseResult,
) -> Result<(), ParseError> {
    // distance rule `match.start() - name_end < 2` in unsigned form;
    // starts before the name end always pass
    let strict_gap_ok = |start: usize| start < name_end + 2;

    let user_ep = compile_user(&input.ep_regexps)?;
    let user_date = compile_user(&input.date_regexps)?;
    let user_id = compile_user(&input.id_regexps)?;
    let user_sequence = compile_user(&input.sequence_regexps)?;

    if matches!(input.mode, IdMode::Ep | IdMode::Auto) {
        if let Some(ep) = episode::parse_episode(data, &user_ep, input.allow_seasonless)? {
            if input.strict_name && ep.start > 1 {
                return Ok(());
            }
            if let Some(end) = ep.end_episode {
                if end > ep.episode + 2 {
                    debug!(episodes = end - ep.episode + 1, "episode pack rejected");
                    return Ok(());
                }
            }
            result.id = Some(EpisodeId::Episode {
                season: ep.season,
                episode: ep.episode,
                end_episode: ep.end_episode,
            });
            return Ok(());
        }

        if input.mode == IdMode::Ep {
            if let Some(ep) = episode::parse_fallback(data) {
                if input.strict_name && ep.start > 1 {
                    return Ok(());
                }
                result.id = Some(EpisodeId::Episode {
                    season: ep.season,
                    episode: ep.episode,
                    end_episode: None,
                });
                return Ok(());
            }
        }
    }

    // a bare `season N` is too ambiguous for the remaining strategies
    if unwanted::has_season_only_marker(data) {
        return Ok(());
    }

    if matches!(input.mode, IdMode::Date | IdMode::Auto) {
        let now = input.now.unwrap_or_else(|| Utc::now().naive_utc());
        if let Some(dm) = date::parse_date(
            data,
            &user_date,
            input.date_dayfirst,
            input.date_yearfirst,
            now,
        ) {
            if input.strict_name && !strict_gap_ok(dm.start) {
                return Ok(());
            }
            result.id_groups = Some(dm.groups);
            result.id = Some(EpisodeId::Date(dm.date));
            return Ok(());
        }
    }

    if matches!(input.mode, IdMode::Id | IdMode::Auto) {
        if let Some(im) = sequence::parse_id(data, &user_id) {
            if input.strict_name && !strict_gap_ok(im.start) {
                return Ok(());
            }
            result.id = Some(EpisodeId::Opaque(im.id));
            return Ok(());
        }
    }

    if matches!(input.mode, IdMode::Sequence | IdMode::Auto) {
        if let Some(sm) = sequence::parse_sequence(data, &user_sequence)? {
            if input.strict_name && !strict_gap_ok(sm.start) {
                return Ok(());
            }
            // an anime version tag overrides the proper count outright
            if let Some(version) = sm.version {
                result.proper_count = version.saturating_sub(1);
            }
            result.id = Some(EpisodeId::Sequence(sm.number));
            return Ok(());
        }
    }

    // no numbering at all: a flagged special adopts the residual as its id,
    // provided anything is left to name it by
    if result.special && !data.is_empty() {
        result.id = Some(EpisodeId::Special(data.to_string()));
        return Ok(());
    }

    debug!(data = %input.data, "no identifier found");
    result.warning = Some(ParseWarning::no_identifier(&input.name, &input.data));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("ep".parse::<IdMode>().unwrap(), IdMode::Ep);
        assert_eq!("AUTO".parse::<IdMode>().unwrap(), IdMode::Auto);
        assert!("weekly".parse::<IdMode>().is_err());
    }

    #[test]
    fn test_identifier_formats() {
        let ep = EpisodeId::Episode {
            season: 1,
            episode: 2,
            end_episode: Some(3),
        };
        assert_eq!(ep.identifier(), "S01E02");
        assert_eq!(
            EpisodeId::Date(NaiveDate::from_ymd_opt(2011, 5, 23).unwrap()).identifier(),
            "2011-05-23"
        );
        assert_eq!(EpisodeId::Sequence(12).identifier(), "12");
        assert_eq!(
            EpisodeId::Special("christmas".to_string()).identifier(),
            "christmas"
        );
    }

    #[test]
    fn test_empty_inputs_are_errors() {
        assert!(matches!(
            parse(&ParseInput::new("", "Some.Title")),
            Err(ParseError::EmptyName)
        ));
        assert!(matches!(
            parse(&ParseInput::new("Show", "  ")),
            Err(ParseError::EmptyData)
        ));
    }

    #[test]
    fn test_bad_user_regex_is_fatal() {
        let input = ParseInput::new("Show", "Show 1x02").ep_regexps(["(unclosed"]);
        assert!(matches!(
            parse(&input),
            Err(ParseError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_release_priority() {
        let mut a = ParseResult::default();
        let mut b = ParseResult::default();
        a.quality = Quality::from_name("720p hdtv").unwrap();
        b.quality = Quality::from_name("1080p hdtv").unwrap();
        assert_eq!(compare_release_priority(&a, &b), Ordering::Less);

        b.quality = a.quality;
        a.proper_count = 1;
        assert_eq!(compare_release_priority(&a, &b), Ordering::Greater);
    }
}
