pub mod config;
pub mod error;
pub mod matching;
pub mod pipeline;
pub mod snippets;
pub mod types;

pub use config::{
    FuzzyConfig, LocatorConfig, PartialConfig, SequenceConfig, SlidingWindowConfig,
};
pub use error::LocateError;
pub use matching::index::{build_index, TranscriptIndex};
pub use matching::normalize::normalize;
pub use matching::NormalizedTarget;
pub use pipeline::builder::SpanLocatorBuilder;
pub use pipeline::runtime::{locate, SpanLocator};
pub use pipeline::traits::MatchStrategy;
pub use snippets::{assemble_snippet, assemble_snippets, remove_overlapping, Narrative, Snippet};
pub use types::{
    LocatedSpan, MatchCandidate, Segment, SegmentWord, StrategyKind, TimeSpan, Transcript, Word,
};
