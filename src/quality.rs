//! Release quality model and the ranked quality vocabulary.
//!
//! Qualities are ordered by `rank`, where a smaller rank is better. The
//! vocabulary carries composite source+resolution tags (`720p hdtv`,
//! `1080p web-dl`) above their bare components, so a title naming both is
//! matched as one tag and the whole span is excised from the residual.

use crate::normalize::captures_not_in_word;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QualitySource {
    BluRay,
    Web,
    HDTV,
    DVD,
    SDTV,
    Unknown,
}

impl QualitySource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BluRay => "BluRay",
            Self::Web => "WEB",
            Self::HDTV => "HDTV",
            Self::DVD => "DVD",
            Self::SDTV => "SDTV",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for QualitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the quality vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Quality {
    pub name: &'static str,
    pub source: QualitySource,
    /// Vertical resolution when the tag implies one, otherwise 0.
    pub resolution: u16,
    /// Relative rank; smaller is better.
    pub rank: i32,
}

impl Quality {
    pub const UNKNOWN: Self = Self {
        name: "unknown",
        source: QualitySource::Unknown,
        resolution: 0,
        rank: 99,
    };

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.rank == Self::UNKNOWN.rank
    }

    #[must_use]
    pub const fn is_better_than(self, other: Self) -> bool {
        self.rank < other.rank
    }

    /// Looks a quality up by its canonical tag name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case(Self::UNKNOWN.name) {
            return Some(Self::UNKNOWN);
        }
        DEFS.iter()
            .find(|def| def.quality.name.eq_ignore_ascii_case(name))
            .map(|def| def.quality)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

struct QualityDef {
    quality: Quality,
    pattern: &'static str,
}

const fn q(name: &'static str, source: QualitySource, resolution: u16, rank: i32) -> Quality {
    Quality {
        name,
        source,
        resolution,
        rank,
    }
}

/// Vocabulary in rank order, best first. Composite patterns accept both token
/// orders separated by a short separator run.
static DEFS: &[QualityDef] = &[
    QualityDef {
        quality: q("1080p bluray", QualitySource::BluRay, 1080, 1),
        pattern: r"(?:blu-?ray|b[dr]-?rip)[\W_]{0,6}1080p?|1080p?[\W_]{0,6}(?:blu-?ray|b[dr]-?rip)",
    },
    QualityDef {
        quality: q("1080p web-dl", QualitySource::Web, 1080, 2),
        pattern: r"web[\W_]?dl[\W_]{0,6}1080p?|1080p?[\W_]{0,6}web[\W_]?dl",
    },
    QualityDef {
        quality: q("1080p hdtv", QualitySource::HDTV, 1080, 3),
        pattern: r"hdtv[\W_]{0,6}1080p?|1080p?[\W_]{0,6}hdtv",
    },
    QualityDef {
        quality: q("1080p", QualitySource::Unknown, 1080, 4),
        pattern: r"1080p?",
    },
    QualityDef {
        quality: q("1080i", QualitySource::HDTV, 1080, 5),
        pattern: r"1080i",
    },
    QualityDef {
        quality: q("720p bluray", QualitySource::BluRay, 720, 6),
        pattern: r"(?:blu-?ray|b[dr]-?rip)[\W_]{0,6}720p?|720p?[\W_]{0,6}(?:blu-?ray|b[dr]-?rip)",
    },
    QualityDef {
        quality: q("720p web-dl", QualitySource::Web, 720, 7),
        pattern: r"web[\W_]?dl[\W_]{0,6}720p?|720p?[\W_]{0,6}web[\W_]?dl",
    },
    QualityDef {
        quality: q("720p hdtv", QualitySource::HDTV, 720, 8),
        pattern: r"hdtv[\W_]{0,6}720p?|720p?[\W_]{0,6}hdtv",
    },
    QualityDef {
        quality: q("720p", QualitySource::Unknown, 720, 9),
        pattern: r"720p?",
    },
    QualityDef {
        quality: q("720i", QualitySource::HDTV, 720, 10),
        pattern: r"720i",
    },
    QualityDef {
        quality: q("hr", QualitySource::Unknown, 0, 11),
        pattern: r"hr",
    },
    QualityDef {
        quality: q("bdrip", QualitySource::BluRay, 0, 12),
        pattern: r"b[dr]-?rip|blu-?ray",
    },
    QualityDef {
        quality: q("dvdrip", QualitySource::DVD, 576, 13),
        pattern: r"dvd-?rip",
    },
    QualityDef {
        quality: q("web-dl", QualitySource::Web, 0, 14),
        pattern: r"web[\W_]?dl",
    },
    QualityDef {
        quality: q("webrip", QualitySource::Web, 0, 15),
        pattern: r"web-?rip",
    },
    QualityDef {
        quality: q("hdtv", QualitySource::HDTV, 0, 16),
        pattern: r"hdtv",
    },
    QualityDef {
        quality: q("480p", QualitySource::SDTV, 480, 17),
        pattern: r"480p?",
    },
    QualityDef {
        quality: q("sdtv", QualitySource::SDTV, 480, 18),
        pattern: r"sdtv|pdtv|dsr(?:ip)?",
    },
    QualityDef {
        quality: q("dvb", QualitySource::SDTV, 0, 19),
        pattern: r"dvb-?rip|dvb",
    },
    QualityDef {
        quality: q("r5", QualitySource::DVD, 0, 20),
        pattern: r"r5",
    },
    QualityDef {
        quality: q("tc", QualitySource::Unknown, 0, 21),
        pattern: r"telecine|tc",
    },
    QualityDef {
        quality: q("ts", QualitySource::Unknown, 0, 22),
        pattern: r"telesync|ts",
    },
    QualityDef {
        quality: q("preair", QualitySource::Unknown, 0, 23),
        pattern: r"preair",
    },
    QualityDef {
        quality: q("cam", QualitySource::Unknown, 0, 24),
        pattern: r"cam-?rip|cam",
    },
    QualityDef {
        quality: q("workprint", QualitySource::Unknown, 0, 25),
        pattern: r"workprint",
    },
];

static MATCHERS: LazyLock<Vec<(Quality, Regex)>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|def| {
            let re = RegexBuilder::new(def.pattern)
                .case_insensitive(true)
                .build()
                .expect("Invalid Regex");
            (def.quality, re)
        })
        .collect()
});

/// Every tag name in the vocabulary, including `unknown`.
pub fn names() -> impl Iterator<Item = &'static str> {
    DEFS.iter()
        .map(|def| def.quality.name)
        .chain(std::iter::once(Quality::UNKNOWN.name))
}

/// Scans `data` for the best quality tag. On a match, returns the quality
/// and the data with the matched span excised; otherwise `UNKNOWN` and
/// `None`.
#[must_use]
pub fn quality_match(data: &str) -> (Quality, Option<String>) {
    for (quality, re) in MATCHERS.iter() {
        if let Some(caps) = captures_not_in_word(re, data) {
            let m = caps.get(0).expect("capture 0 always participates");
            debug!(quality = quality.name, tag = m.as_str(), "quality matched");
            let mut remaining = String::with_capacity(data.len() - m.len());
            remaining.push_str(&data[..m.start()]);
            remaining.push_str(&data[m.end()..]);
            return (*quality, Some(remaining));
        }
    }
    (Quality::UNKNOWN, None)
}
