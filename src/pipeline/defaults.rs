use crate::config::{
    FuzzyConfig, LocatorConfig, PartialConfig, SequenceConfig, SlidingWindowConfig,
};
use crate::matching::fuzzy::fuzzy_match;
use crate::matching::index::TranscriptIndex;
use crate::matching::partial::partial_match;
use crate::matching::sequence::sequence_match;
use crate::matching::sliding_window::sliding_window_match;
use crate::matching::NormalizedTarget;
use crate::pipeline::traits::MatchStrategy;
use crate::types::{MatchCandidate, StrategyKind};

pub(crate) struct FuzzyRatioStrategy {
    pub config: FuzzyConfig,
}

impl MatchStrategy for FuzzyRatioStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Fuzzy
    }

    fn find_match(
        &self,
        index: &TranscriptIndex,
        target: &NormalizedTarget,
    ) -> Option<MatchCandidate> {
        fuzzy_match(index.normalized_words(), &target.text, &self.config)
    }
}

pub(crate) struct SlidingWindowStrategy {
    pub config: SlidingWindowConfig,
}

impl MatchStrategy for SlidingWindowStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SlidingWindow
    }

    fn find_match(
        &self,
        index: &TranscriptIndex,
        target: &NormalizedTarget,
    ) -> Option<MatchCandidate> {
        sliding_window_match(index.normalized_words(), &target.words(), &self.config)
    }
}

pub(crate) struct SequenceAlignmentStrategy {
    pub config: SequenceConfig,
}

impl MatchStrategy for SequenceAlignmentStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequence
    }

    fn find_match(
        &self,
        index: &TranscriptIndex,
        target: &NormalizedTarget,
    ) -> Option<MatchCandidate> {
        sequence_match(index.normalized_text(), &target.text, index.len(), &self.config)
    }
}

pub(crate) struct PartialPhraseStrategy {
    pub config: PartialConfig,
}

impl MatchStrategy for PartialPhraseStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Partial
    }

    fn find_match(
        &self,
        index: &TranscriptIndex,
        target: &NormalizedTarget,
    ) -> Option<MatchCandidate> {
        partial_match(index.normalized_text(), &target.words(), index.len(), &self.config)
    }
}

pub(crate) fn strategy_for(kind: StrategyKind, config: &LocatorConfig) -> Box<dyn MatchStrategy> {
    match kind {
        StrategyKind::Fuzzy => Box::new(FuzzyRatioStrategy {
            config: config.fuzzy.clone(),
        }),
        StrategyKind::SlidingWindow => Box::new(SlidingWindowStrategy {
            config: config.sliding_window.clone(),
        }),
        StrategyKind::Sequence => Box::new(SequenceAlignmentStrategy {
            config: config.sequence.clone(),
        }),
        StrategyKind::Partial => Box::new(PartialPhraseStrategy {
            config: config.partial.clone(),
        }),
    }
}

/// Strategies for `config.cascade`, in cascade order.
pub(crate) fn cascade_strategies(config: &LocatorConfig) -> Vec<Box<dyn MatchStrategy>> {
    config
        .cascade
        .iter()
        .map(|&kind| strategy_for(kind, config))
        .collect()
}
