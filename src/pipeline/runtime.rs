use rayon::prelude::*;

use crate::config::LocatorConfig;
use crate::matching::index::TranscriptIndex;
use crate::matching::NormalizedTarget;
use crate::pipeline::defaults::{cascade_strategies, strategy_for};
use crate::pipeline::traits::MatchStrategy;
use crate::types::{LocatedSpan, MatchCandidate, StrategyKind, TimeSpan, Transcript};

/// Cascading sentence-to-span locator.
///
/// Strategies run in cascade order and the first candidate wins. The locator
/// holds no per-query state, so one instance can serve any number of
/// concurrent queries against a shared [`TranscriptIndex`].
pub struct SpanLocator {
    config: LocatorConfig,
    strategies: Vec<Box<dyn MatchStrategy>>,
}

pub(crate) struct SpanLocatorParts {
    pub config: LocatorConfig,
    pub strategies: Vec<Box<dyn MatchStrategy>>,
}

impl SpanLocator {
    pub(crate) fn from_parts(parts: SpanLocatorParts) -> Self {
        Self {
            config: parts.config,
            strategies: parts.strategies,
        }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    pub fn cascade(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Buffered span of `sentence`, or `None` when no strategy is confident.
    ///
    /// `None` means "no usable span"; callers should drop the boundary
    /// rather than treat it as an empty interval.
    pub fn locate(&self, index: &TranscriptIndex, sentence: &str) -> Option<TimeSpan> {
        self.locate_detailed(index, sentence).map(|located| located.span)
    }

    pub fn locate_detailed(&self, index: &TranscriptIndex, sentence: &str) -> Option<LocatedSpan> {
        let target = NormalizedTarget::new(sentence);
        if index.is_empty() || target.is_empty() {
            tracing::debug!(
                word_count = index.len(),
                target_empty = target.is_empty(),
                "cascade: nothing to match"
            );
            return None;
        }

        for strategy in &self.strategies {
            let kind = strategy.kind();
            match strategy.find_match(index, &target) {
                Some(candidate) => {
                    let located = self.to_located(index, kind, candidate);
                    tracing::debug!(
                        strategy = kind.as_str(),
                        score = candidate.score,
                        start_word_index = candidate.start_word_index,
                        end_word_index = candidate.end_word_index,
                        start_time = located.span.start_time,
                        end_time = located.span.end_time,
                        "cascade: match found"
                    );
                    return Some(located);
                }
                None => {
                    tracing::debug!(strategy = kind.as_str(), "cascade: strategy found no match");
                }
            }
        }

        tracing::warn!(
            target_text = target.text.as_str(),
            "cascade: no strategy located the sentence"
        );
        None
    }

    /// Runs a single strategy, bypassing the cascade. The configured buffer
    /// still applies. A kind outside the cascade runs with its built-in
    /// implementation.
    pub fn locate_with(
        &self,
        kind: StrategyKind,
        index: &TranscriptIndex,
        sentence: &str,
    ) -> Option<LocatedSpan> {
        let target = NormalizedTarget::new(sentence);
        if index.is_empty() || target.is_empty() {
            return None;
        }
        let candidate = match self.strategies.iter().find(|s| s.kind() == kind) {
            Some(strategy) => strategy.find_match(index, &target),
            None => strategy_for(kind, &self.config).find_match(index, &target),
        };
        candidate.map(|candidate| self.to_located(index, kind, candidate))
    }

    /// Locates every sentence in parallel. Output order follows `sentences`.
    pub fn locate_all<S>(&self, index: &TranscriptIndex, sentences: &[S]) -> Vec<Option<TimeSpan>>
    where
        S: AsRef<str> + Sync,
    {
        sentences
            .par_iter()
            .map(|sentence| self.locate(index, sentence.as_ref()))
            .collect()
    }

    fn to_located(
        &self,
        index: &TranscriptIndex,
        strategy: StrategyKind,
        candidate: MatchCandidate,
    ) -> LocatedSpan {
        let words = index.words();
        let raw_span = TimeSpan {
            start_time: words[candidate.start_word_index].start,
            end_time: words[candidate.end_word_index].end,
        };
        LocatedSpan {
            span: raw_span.buffered(self.config.buffer_seconds),
            raw_span,
            strategy,
            score: candidate.score,
        }
    }
}

impl Default for SpanLocator {
    fn default() -> Self {
        let config = LocatorConfig::default();
        Self {
            strategies: cascade_strategies(&config),
            config,
        }
    }
}

/// One-shot lookup against a raw transcript with the default cascade.
///
/// Builds the word index on every call; reuse a [`TranscriptIndex`] and
/// [`SpanLocator`] when querying the same transcript repeatedly.
pub fn locate(transcript: &Transcript, sentence: &str, buffer_seconds: f64) -> Option<TimeSpan> {
    let index = TranscriptIndex::from_transcript(transcript);
    let config = LocatorConfig {
        buffer_seconds: buffer_seconds.max(0.0),
        ..LocatorConfig::default()
    };
    SpanLocator::from_parts(SpanLocatorParts {
        strategies: cascade_strategies(&config),
        config,
    })
    .locate(&index, sentence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::builder::SpanLocatorBuilder;
    use crate::types::{Segment, Word};

    const SENTENCE_WORDS: [&str; 10] = [
        "I", "learned", "that", "failure", "is", "temporary", "but", "regret", "is", "forever",
    ];

    fn index_of(words: &[&str]) -> TranscriptIndex {
        TranscriptIndex::new(
            words
                .iter()
                .enumerate()
                .map(|(i, w)| Word::new(*w, i as f64, i as f64 + 1.0))
                .collect(),
        )
    }

    fn split_index(text: &str) -> TranscriptIndex {
        index_of(&text.split_whitespace().collect::<Vec<_>>())
    }

    fn assert_span(span: TimeSpan, start: f64, end: f64) {
        assert!(
            (span.start_time - start).abs() < 1e-9 && (span.end_time - end).abs() < 1e-9,
            "expected ({start}, {end}), got ({}, {})",
            span.start_time,
            span.end_time
        );
    }

    #[test]
    fn exact_sentence_is_buffered_by_one_second() {
        let locator = SpanLocator::default();
        let located = locator
            .locate_detailed(&index_of(&SENTENCE_WORDS), "failure is temporary")
            .expect("exact match");
        assert_eq!(located.strategy, StrategyKind::Fuzzy);
        assert_eq!(located.score, 100.0);
        assert_span(located.raw_span, 3.0, 6.0);
        assert_span(located.span, 2.0, 7.0);
    }

    #[test]
    fn filler_and_contractions_resolve_through_fuzzy_matching() {
        let locator = SpanLocator::default();
        let located = locator
            .locate_detailed(
                &index_of(&SENTENCE_WORDS),
                "um, I'm telling you that failure, like, is temporary",
            )
            .expect("normalized sentence still matches");
        assert_eq!(located.strategy, StrategyKind::Fuzzy);
        assert!(located.raw_span.start_time <= 3.0);
        assert!(located.raw_span.end_time >= 6.0);
    }

    #[test]
    fn unrelated_sentence_returns_none() {
        let locator = SpanLocator::default();
        assert!(locator
            .locate(&index_of(&SENTENCE_WORDS), "zebras juggle quartz")
            .is_none());
    }

    #[test]
    fn empty_index_returns_none_for_any_sentence() {
        let locator = SpanLocator::default();
        let empty = TranscriptIndex::new(Vec::new());
        for sentence in ["failure is temporary", "", "anything at all"] {
            assert!(locator.locate(&empty, sentence).is_none());
        }
    }

    #[test]
    fn empty_target_returns_none() {
        let locator = SpanLocator::default();
        assert!(locator.locate(&index_of(&SENTENCE_WORDS), "").is_none());
        assert!(locator.locate(&index_of(&SENTENCE_WORDS), "um, uh").is_none());
    }

    #[test]
    fn fuzzy_result_wins_over_sliding_window() {
        let index = split_index("failure is often temporary and we said failure is temporary.");
        let locator = SpanLocator::default();

        let sliding = locator
            .locate_with(StrategyKind::SlidingWindow, &index, "failure is temporary")
            .expect("sliding window alone matches");
        assert_span(sliding.raw_span, 0.0, 4.0);

        let located = locator
            .locate_detailed(&index, "failure is temporary")
            .expect("cascade matches");
        assert_eq!(located.strategy, StrategyKind::Fuzzy);
        assert_span(located.raw_span, 7.0, 10.0);
    }

    #[test]
    fn falls_through_to_sliding_window() {
        let index = split_index(
            "failure honestly in my long experience is very rarely anything but temporary okay",
        );
        let located = SpanLocator::default()
            .locate_detailed(&index, "failure is temporary")
            .expect("sliding window match");
        assert_eq!(located.strategy, StrategyKind::SlidingWindow);
        assert_span(located.raw_span, 0.0, 12.0);
    }

    #[test]
    fn falls_through_to_sequence_alignment() {
        let located = SpanLocator::default()
            .locate_detailed(&index_of(&SENTENCE_WORDS), "failure is temporary 1 2 3 4 5 6 7")
            .expect("sequence match");
        assert_eq!(located.strategy, StrategyKind::Sequence);
        assert_span(located.raw_span, 3.0, 6.0);
    }

    #[test]
    fn falls_through_to_partial_phrase() {
        let located = SpanLocator::default()
            .locate_detailed(
                &index_of(&SENTENCE_WORDS),
                "zebras juggle quartz crystals failure is temporary on tuesdays while dancing badly",
            )
            .expect("partial match");
        assert_eq!(located.strategy, StrategyKind::Partial);
        assert_span(located.raw_span, 3.0, 10.0);
        assert_span(located.span, 2.0, 11.0);
    }

    #[test]
    fn buffer_never_goes_negative() {
        let located = SpanLocator::default()
            .locate_detailed(&index_of(&SENTENCE_WORDS), "I learned that")
            .expect("match at transcript start");
        assert_span(located.raw_span, 0.0, 3.0);
        assert_span(located.span, 0.0, 4.0);
        assert!(located.raw_span.end_time >= located.raw_span.start_time);
    }

    #[test]
    fn custom_cascade_order_is_respected() {
        let index = split_index("failure is often temporary and we said failure is temporary.");
        let locator = SpanLocatorBuilder::new(LocatorConfig::default())
            .with_cascade(vec![StrategyKind::SlidingWindow, StrategyKind::Fuzzy])
            .with_buffer_seconds(0.0)
            .build()
            .expect("valid config");
        let located = locator
            .locate_detailed(&index, "failure is temporary")
            .expect("match");
        assert_eq!(located.strategy, StrategyKind::SlidingWindow);
        assert_span(located.span, 0.0, 4.0);
    }

    #[test]
    fn locate_all_preserves_order() {
        let locator = SpanLocator::default();
        let index = index_of(&SENTENCE_WORDS);
        let results = locator.locate_all(
            &index,
            &["regret is forever", "zebras juggle quartz", "failure is temporary"],
        );
        assert_eq!(results.len(), 3);
        assert_span(results[0].expect("first"), 6.0, 11.0);
        assert!(results[1].is_none());
        assert_span(results[2].expect("third"), 2.0, 7.0);
    }

    #[test]
    fn free_locate_builds_index_from_segments() {
        let transcript = Transcript {
            segments: vec![Segment {
                start: 0.0,
                end: 10.0,
                text: SENTENCE_WORDS.join(" "),
                words: None,
            }],
        };
        let span = locate(&transcript, "failure is temporary", 1.0).expect("match");
        assert_span(span, 2.0, 7.0);
        assert!(locate(&Transcript::default(), "failure is temporary", 1.0).is_none());
    }
}
