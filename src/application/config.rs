use super::pacing::interval_for_rate;
use crate::domain::{DEFAULT_PARALLEL_THRESHOLD, Strategy};
use crate::error::{EngineError, Result};

/// Startup configuration for an [`Engine`](super::Engine).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// Steps per second when the engine starts
    pub default_rate: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    pub strategy: Strategy,
    /// Cell count at which `Strategy::Auto` evaluates rows in parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            default_rate: 5.0,
            min_rate: 0.1,
            max_rate: 60.0,
            strategy: Strategy::Auto,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl EngineConfig {
    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_default_rate(mut self, rate: f64) -> Self {
        self.default_rate = rate;
        self
    }

    pub fn with_rate_bounds(mut self, min_rate: f64, max_rate: f64) -> Self {
        self.min_rate = min_rate;
        self.max_rate = max_rate;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel_threshold(mut self, cells: usize) -> Self {
        self.parallel_threshold = cells;
        self
    }

    /// Check every value the engine relies on
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig("grid dimensions must be non-zero"));
        }
        if !self.min_rate.is_finite() || self.min_rate <= 0.0 {
            return Err(EngineError::InvalidConfig("min_rate must be finite and positive"));
        }
        if interval_for_rate(self.min_rate).is_none() {
            return Err(EngineError::InvalidConfig("min_rate is too small for a step interval"));
        }
        if !self.max_rate.is_finite() || self.max_rate < self.min_rate {
            return Err(EngineError::InvalidConfig("max_rate must be finite and >= min_rate"));
        }
        if !(self.min_rate..=self.max_rate).contains(&self.default_rate) {
            return Err(EngineError::InvalidConfig("default_rate must lie within the rate bounds"));
        }
        Ok(())
    }
}
