use std::cmp::Ordering;
use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LocateError;
use crate::matching::index::TranscriptIndex;
use crate::pipeline::runtime::SpanLocator;
use crate::types::StrategyKind;

/// A story picked out by the narrative extractor, bounded by two sentences
/// quoted from the transcript.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Narrative {
    pub title: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub summary: String,
    pub start_sentence: String,
    pub end_sentence: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NarrativeDocument {
    Wrapped { snippets: Vec<Narrative> },
    Bare(Vec<Narrative>),
}

impl Narrative {
    /// Parses either a bare JSON array of narratives or the extractor's
    /// `{ "snippets": [...] }` envelope.
    pub fn list_from_json_str(data: &str) -> Result<Vec<Self>, LocateError> {
        let document: NarrativeDocument =
            serde_json::from_str(data).map_err(|e| LocateError::json("parse narratives", e))?;
        Ok(match document {
            NarrativeDocument::Wrapped { snippets } => snippets,
            NarrativeDocument::Bare(narratives) => narratives,
        })
    }

    pub fn load_list(path: &Path) -> Result<Vec<Self>, LocateError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| LocateError::io("read narratives", e))?;
        Self::list_from_json_str(&data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snippet {
    pub title: String,
    pub theme: String,
    pub summary: String,
    pub start_time: f64,
    pub end_time: f64,
    pub start_strategy: StrategyKind,
    pub end_strategy: StrategyKind,
}

/// Turns each narrative into a time span: the start of its opening sentence
/// to the end of its closing sentence.
///
/// Narratives whose boundaries cannot both be located, or whose closing
/// sentence does not end after the opening one starts, are dropped.
pub fn assemble_snippet(
    locator: &SpanLocator,
    index: &TranscriptIndex,
    narrative: &Narrative,
) -> Option<Snippet> {
    let start = locator.locate_detailed(index, &narrative.start_sentence);
    let end = locator.locate_detailed(index, &narrative.end_sentence);
    let (Some(start), Some(end)) = (start, end) else {
        tracing::warn!(
            title = narrative.title.as_str(),
            start_found = start.is_some(),
            end_found = end.is_some(),
            "snippets: narrative boundary not found, skipping"
        );
        return None;
    };

    let start_time = start.span.start_time;
    let end_time = end.span.end_time;
    if end_time <= start_time {
        tracing::warn!(
            title = narrative.title.as_str(),
            start_time,
            end_time,
            "snippets: closing sentence precedes opening sentence, skipping"
        );
        return None;
    }

    Some(Snippet {
        title: narrative.title.clone(),
        theme: narrative.theme.clone(),
        summary: narrative.summary.clone(),
        start_time,
        end_time,
        start_strategy: start.strategy,
        end_strategy: end.strategy,
    })
}

/// Assembles narratives in parallel; output keeps the input order.
pub fn assemble_snippets(
    locator: &SpanLocator,
    index: &TranscriptIndex,
    narratives: &[Narrative],
) -> Vec<Snippet> {
    narratives
        .par_iter()
        .filter_map(|narrative| assemble_snippet(locator, index, narrative))
        .collect()
}

/// Sorts by start time and keeps a snippet only if it starts strictly after
/// the previously kept one ends.
pub fn remove_overlapping(mut snippets: Vec<Snippet>) -> Vec<Snippet> {
    snippets.sort_by(|a, b| {
        a.start_time
            .partial_cmp(&b.start_time)
            .unwrap_or(Ordering::Equal)
    });

    let mut kept: Vec<Snippet> = Vec::with_capacity(snippets.len());
    for snippet in snippets {
        match kept.last() {
            Some(last) if snippet.start_time <= last.end_time => {
                tracing::debug!(
                    title = snippet.title.as_str(),
                    overlaps = last.title.as_str(),
                    "snippets: dropping overlapping snippet"
                );
            }
            _ => kept.push(snippet),
        }
    }
    kept
}
