use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LocateError;
use crate::types::StrategyKind;

/// Tunable policy values for the matching cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    pub buffer_seconds: f64,
    /// Strategies in the order they are attempted.
    pub cascade: Vec<StrategyKind>,
    pub fuzzy: FuzzyConfig,
    pub sliding_window: SlidingWindowConfig,
    pub sequence: SequenceConfig,
    pub partial: PartialConfig,
}

impl LocatorConfig {
    pub const DEFAULT_BUFFER_SECONDS: f64 = 1.0;

    pub fn load(path: &Path) -> Result<Self, LocateError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| LocateError::io("read locator config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| LocateError::json("parse locator config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LocateError> {
        if !self.buffer_seconds.is_finite() || self.buffer_seconds < 0.0 {
            return Err(LocateError::invalid_config(format!(
                "buffer_seconds must be a finite non-negative number, got {}",
                self.buffer_seconds
            )));
        }
        if self.cascade.is_empty() {
            return Err(LocateError::invalid_config("cascade must name at least one strategy"));
        }
        let mut seen = HashSet::new();
        for kind in &self.cascade {
            if !seen.insert(*kind) {
                return Err(LocateError::invalid_config(format!(
                    "strategy '{}' appears more than once in cascade",
                    kind.as_str()
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.fuzzy.min_score) {
            return Err(LocateError::invalid_config(format!(
                "fuzzy.min_score must be within 0..=100, got {}",
                self.fuzzy.min_score
            )));
        }
        if self.fuzzy.window_offsets.is_empty() {
            return Err(LocateError::invalid_config("fuzzy.window_offsets must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.sliding_window.min_score) {
            return Err(LocateError::invalid_config(format!(
                "sliding_window.min_score must be within 0..=1, got {}",
                self.sliding_window.min_score
            )));
        }
        if !(0.0..=1.0).contains(&self.sequence.min_coverage) {
            return Err(LocateError::invalid_config(format!(
                "sequence.min_coverage must be within 0..=1, got {}",
                self.sequence.min_coverage
            )));
        }
        if self.partial.chunk_sizes.is_empty() || self.partial.chunk_sizes.contains(&0) {
            return Err(LocateError::invalid_config(
                "partial.chunk_sizes must be non-empty and contain no zero sizes",
            ));
        }
        Ok(())
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            buffer_seconds: Self::DEFAULT_BUFFER_SECONDS,
            cascade: StrategyKind::ALL.to_vec(),
            fuzzy: FuzzyConfig::default(),
            sliding_window: SlidingWindowConfig::default(),
            sequence: SequenceConfig::default(),
            partial: PartialConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Best window must score strictly above this percentage.
    pub min_score: f64,
    /// Window sizes relative to the target word count, tried in this order.
    pub window_offsets: Vec<isize>,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            min_score: 70.0,
            window_offsets: vec![0, 2, -1, 5],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlidingWindowConfig {
    /// Fraction of target words that must be found in order, exclusive.
    pub min_score: f64,
    /// Window sizes run from the target length up to, not including,
    /// target length plus this value.
    pub max_extra_words: usize,
}

impl Default for SlidingWindowConfig {
    fn default() -> Self {
        Self {
            min_score: 0.6,
            max_extra_words: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Minimum share of the target's characters the common block must cover.
    pub min_coverage: f64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self { min_coverage: 0.6 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    /// Chunk sizes in words, largest first.
    pub chunk_sizes: Vec<usize>,
    /// Words appended after a found chunk to estimate where the sentence ends.
    pub trailing_words: usize,
}

impl Default for PartialConfig {
    fn default() -> Self {
        Self {
            chunk_sizes: vec![5, 4, 3],
            trailing_words: 5,
        }
    }
}
