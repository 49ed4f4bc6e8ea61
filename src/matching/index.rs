use crate::matching::normalize::normalize;
use crate::types::{Segment, Transcript, Word};

/// Flattens segments into one ordered word sequence.
///
/// Segments carrying word timestamps are copied as-is. Segments without them
/// get timestamps spread evenly across the segment duration; a segment with
/// no positive duration is treated as one word per second.
pub fn build_index(segments: &[Segment]) -> Vec<Word> {
    let mut words = Vec::new();
    for segment in segments {
        match segment.words.as_deref() {
            Some(entries) if !entries.is_empty() => {
                words.extend(
                    entries
                        .iter()
                        .map(|w| Word::new(w.word.as_str(), w.start, w.end)),
                );
            }
            _ => interpolate_segment(segment, &mut words),
        }
    }
    words
}

fn interpolate_segment(segment: &Segment, out: &mut Vec<Word>) {
    let tokens: Vec<&str> = segment.text.split_whitespace().collect();
    if tokens.is_empty() {
        return;
    }
    let duration = segment.end - segment.start;
    let words_per_second = if duration > 0.0 {
        tokens.len() as f64 / duration
    } else {
        tokens.len() as f64
    };

    for (i, token) in tokens.iter().enumerate() {
        let start = segment.start + i as f64 / words_per_second;
        let end = (segment.start + (i + 1) as f64 / words_per_second).min(segment.end);
        out.push(Word::new(*token, start, end));
    }
}

/// Immutable word sequence plus the normalized text every strategy reads.
///
/// Built once per transcript and shared read-only between queries.
#[derive(Debug, Clone)]
pub struct TranscriptIndex {
    words: Vec<Word>,
    normalized_words: Vec<String>,
    normalized_text: String,
}

impl TranscriptIndex {
    pub fn new(words: Vec<Word>) -> Self {
        let normalized_words = words.iter().map(|w| normalize(&w.text)).collect();
        let full_text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let normalized_text = normalize(&full_text);
        tracing::debug!(
            word_count = words.len(),
            normalized_chars = normalized_text.len(),
            "index: built transcript index"
        );
        Self {
            words,
            normalized_words,
            normalized_text,
        }
    }

    pub fn from_segments(segments: &[Segment]) -> Self {
        Self::new(build_index(segments))
    }

    pub fn from_transcript(transcript: &Transcript) -> Self {
        Self::from_segments(&transcript.segments)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Each word normalized on its own, aligned with [`Self::words`].
    pub fn normalized_words(&self) -> &[String] {
        &self.normalized_words
    }

    /// The whole transcript joined and normalized in one pass. Fillers and
    /// contractions mean its word count can differ from [`Self::len`].
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }
}
