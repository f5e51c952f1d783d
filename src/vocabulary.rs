//! Static token vocabularies used by the parse pipeline.
//!
//! All word lists are lowercase: the residual string is lowercased before any
//! vocabulary lookup. The tables are process-wide immutable data.

/// Markers meaning a release supersedes an earlier one of the same episode.
pub const PROPERS: &[&str] = &["proper", "repack", "rerip", "real"];

/// Markers for named episodes outside the regular numbering.
pub const SPECIALS: &[&str] = &["special", "bonus", "extra", "omake", "ova"];

/// Video codec tags, stripped before identifier matching so `x264` never
/// reads as numbering.
pub const CODECS: &[&str] = &["x264", "x.264", "h264", "h.264", "xvid", "divx", "dvdr"];

/// Audio tags, stripped for the same reason (`dd5.1` contains digits).
pub const SOUNDS: &[&str] = &["ac3", "dd5.1", "dts"];

/// Nuisance words with no quality or identifier meaning.
pub const REMOVE: &[&str] = &["imax"];

/// Passive regex groups tolerated before the series name, e.g. a `[group]`
/// tag or an `HD.720p:` feed prefix. Each entry must stay a `(?:...)` group
/// so they can be joined into a single optional alternation.
pub const IGNORE_PREFIXES: &[&str] = &[r"(?:\[[^\[\]]*\])", r"(?:HD.720p?:)", r"(?:HD.1080p?:)"];
