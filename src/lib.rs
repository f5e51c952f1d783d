//! Series release-title parsing.
//!
//! Takes a free-form release title and a configured series name and extracts
//! structured episode identification: season/episode, airdate, absolute
//! sequence number or an opaque id, together with quality, proper count,
//! release group and a special flag.
//!
//! ```
//! use seriarr::{ParseInput, parse};
//!
//! let input = ParseInput::new("Some Show", "Some.Show.S01E02.720p.HDTV.x264-GRP");
//! let result = parse(&input).unwrap();
//! assert_eq!(result.identifier().as_deref(), Some("S01E02"));
//! assert_eq!(result.quality.name, "720p hdtv");
//! ```
//!
//! Parsing is a pure synchronous function: no I/O, no shared mutable state.
//! Vocabularies and compiled regex sets are process-wide immutable statics.

pub mod error;
pub mod normalize;
pub mod numerals;
pub mod parser;
pub mod quality;
pub mod vocabulary;

pub use error::{ParseError, ParseWarning, WarningKind};
pub use parser::{
    EpisodeId, IdKind, IdMode, ParseInput, ParseResult, compare_release_priority, parse,
};
pub use quality::{Quality, QualitySource};
