use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LocateError;

/// Whisper-style transcription output. Fields beyond `segments` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transcript {
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub text: String,
    /// Word-level timestamps. Absent, `null` and `[]` all mean "interpolate from `text`".
    #[serde(default)]
    pub words: Option<Vec<SegmentWord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentWord {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

impl Transcript {
    pub fn from_json_str(data: &str) -> Result<Self, LocateError> {
        serde_json::from_str(data).map_err(|e| LocateError::json("parse transcript", e))
    }

    pub fn load(path: &Path) -> Result<Self, LocateError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| LocateError::io("read transcript", e))?;
        Self::from_json_str(&data)
    }
}

/// A transcript word with its time interval in seconds.
///
/// `end >= start` and non-decreasing `start` across a sequence are
/// preconditions; nothing downstream repairs inputs that violate them.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSpan {
    pub start_time: f64,
    pub end_time: f64,
}

impl TimeSpan {
    /// Widens the span by `buffer_seconds` on both sides, never before zero.
    pub fn buffered(self, buffer_seconds: f64) -> Self {
        Self {
            start_time: (self.start_time - buffer_seconds).max(0.0),
            end_time: self.end_time + buffer_seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Fuzzy,
    SlidingWindow,
    Sequence,
    Partial,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Fuzzy,
        StrategyKind::SlidingWindow,
        StrategyKind::Sequence,
        StrategyKind::Partial,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fuzzy => "fuzzy",
            Self::SlidingWindow => "sliding_window",
            Self::Sequence => "sequence",
            Self::Partial => "partial",
        }
    }
}

/// Diagnostic view of a successful lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocatedSpan {
    /// Span after the configured buffer was applied.
    pub span: TimeSpan,
    /// Span exactly as covered by the matched words.
    pub raw_span: TimeSpan,
    pub strategy: StrategyKind,
    /// Strategy-specific score: percentage for fuzzy, ratio for sliding
    /// window, matched characters for sequence, chunk words for partial.
    pub score: f64,
}

/// Inclusive word-index range picked by one strategy. Indices refer to
/// [`crate::TranscriptIndex::words`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub start_word_index: usize,
    pub end_word_index: usize,
    pub score: f64,
}
