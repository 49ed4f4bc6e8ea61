use crate::matching::index::TranscriptIndex;
use crate::matching::NormalizedTarget;
use crate::types::{MatchCandidate, StrategyKind};

/// One step of the cascade. Implementations are pure over their inputs.
///
/// `kind` names the cascade slot the strategy fills; a custom implementation
/// passed to [`crate::SpanLocatorBuilder::with_strategy`] replaces the
/// built-in strategy of that kind.
pub trait MatchStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn find_match(
        &self,
        index: &TranscriptIndex,
        target: &NormalizedTarget,
    ) -> Option<MatchCandidate>;
}
