use std::path::Path;

use crate::config::LocatorConfig;
use crate::error::LocateError;
use crate::pipeline::defaults::strategy_for;
use crate::pipeline::runtime::{SpanLocator, SpanLocatorParts};
use crate::pipeline::traits::MatchStrategy;
use crate::types::StrategyKind;

pub struct SpanLocatorBuilder {
    config: LocatorConfig,
    strategy_overrides: Vec<Box<dyn MatchStrategy>>,
}

impl SpanLocatorBuilder {
    pub fn new(config: LocatorConfig) -> Self {
        Self {
            config,
            strategy_overrides: Vec::new(),
        }
    }

    pub fn from_config_file(path: &Path) -> Result<Self, LocateError> {
        Ok(Self::new(LocatorConfig::load(path)?))
    }

    pub fn with_buffer_seconds(mut self, buffer_seconds: f64) -> Self {
        self.config.buffer_seconds = buffer_seconds;
        self
    }

    pub fn with_cascade(mut self, cascade: Vec<StrategyKind>) -> Self {
        self.config.cascade = cascade;
        self
    }

    /// Replaces the built-in strategy for `strategy.kind()`. A later override
    /// of the same kind wins.
    pub fn with_strategy(mut self, strategy: Box<dyn MatchStrategy>) -> Self {
        let kind = strategy.kind();
        self.strategy_overrides.retain(|s| s.kind() != kind);
        self.strategy_overrides.push(strategy);
        self
    }

    pub fn build(self) -> Result<SpanLocator, LocateError> {
        self.config.validate()?;

        let mut overrides = self.strategy_overrides;
        if let Some(unused) = overrides
            .iter()
            .find(|s| !self.config.cascade.contains(&s.kind()))
        {
            return Err(LocateError::invalid_config(format!(
                "strategy override '{}' is not part of the cascade",
                unused.kind().as_str()
            )));
        }

        let strategies: Vec<Box<dyn MatchStrategy>> = self
            .config
            .cascade
            .iter()
            .map(|&kind| match overrides.iter().position(|s| s.kind() == kind) {
                Some(pos) => overrides.swap_remove(pos),
                None => strategy_for(kind, &self.config),
            })
            .collect();

        Ok(SpanLocator::from_parts(SpanLocatorParts {
            strategies,
            config: self.config,
        }))
    }
}
