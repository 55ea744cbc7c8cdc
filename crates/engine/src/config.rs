//! Tunables of the recommendation pipeline.
//!
//! Every field has a default, so an empty TOML file (or none at all) gives
//! the stock behaviour. Example:
//!
//! ```toml
//! final_k = 8
//! language = "ko-KR"
//! vote_thresholds = [500, 200, 0]
//!
//! [weights]
//! genre = 0.5
//! ```

use std::path::Path;

use pipeline::filters::vote_floor::{DEFAULT_MIN_POOL, DEFAULT_VOTE_THRESHOLDS};
use pipeline::{DEFAULT_LAMBDA, ScoreWeights};
use serde::{Deserialize, Serialize};

use crate::error::{RecommendError, Result};

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Number of recommendations returned
    #[serde(default = "default_final_k")]
    pub final_k: usize,

    /// MMR relevance/diversity trade-off, strictly between 0 and 1
    #[serde(default = "default_mmr_lambda")]
    pub mmr_lambda: f64,

    /// Best-scored candidates handed to MMR
    #[serde(default = "default_mmr_pool")]
    pub mmr_pool: usize,

    /// Results kept per discovery query
    #[serde(default = "default_per_call")]
    pub per_call: usize,

    /// Results kept per expansion call
    #[serde(default = "default_per_seed")]
    pub per_seed: usize,

    /// Top-scored candidates expanded through the movie graph
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,

    /// Smallest pool the quality filter must leave
    #[serde(default = "default_min_pool")]
    pub min_pool: usize,

    /// Vote-count floors, strictest first
    #[serde(default = "default_vote_thresholds")]
    pub vote_thresholds: Vec<u32>,

    /// Catalog language tag
    #[serde(default = "default_language")]
    pub language: String,

    /// Catalog result page
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default)]
    pub weights: ScoreWeights,
}

fn default_final_k() -> usize {
    5
}

fn default_mmr_lambda() -> f64 {
    DEFAULT_LAMBDA
}

fn default_mmr_pool() -> usize {
    90
}

fn default_per_call() -> usize {
    55
}

fn default_per_seed() -> usize {
    35
}

fn default_seed_count() -> usize {
    3
}

fn default_min_pool() -> usize {
    DEFAULT_MIN_POOL
}

fn default_vote_thresholds() -> Vec<u32> {
    DEFAULT_VOTE_THRESHOLDS.to_vec()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_page() -> u32 {
    1
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            final_k: default_final_k(),
            mmr_lambda: default_mmr_lambda(),
            mmr_pool: default_mmr_pool(),
            per_call: default_per_call(),
            per_seed: default_per_seed(),
            seed_count: default_seed_count(),
            min_pool: default_min_pool(),
            vote_thresholds: default_vote_thresholds(),
            language: default_language(),
            page: default_page(),
            weights: ScoreWeights::default(),
        }
    }
}

impl RecommendConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RecommendConfig =
            toml::from_str(content).map_err(|e| RecommendError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RecommendError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.mmr_lambda > 0.0 && self.mmr_lambda < 1.0) {
            return Err(RecommendError::Config(format!(
                "mmr_lambda must be within (0, 1), got {}",
                self.mmr_lambda
            )));
        }
        if self.final_k == 0 {
            return Err(RecommendError::Config("final_k must be at least 1".to_string()));
        }
        if self.mmr_pool == 0 {
            return Err(RecommendError::Config("mmr_pool must be at least 1".to_string()));
        }
        if self.page == 0 {
            return Err(RecommendError::Config("page starts at 1".to_string()));
        }
        if self.language.trim().is_empty() {
            return Err(RecommendError::Config("language must not be empty".to_string()));
        }
        if self.vote_thresholds.is_empty() {
            return Err(RecommendError::Config(
                "vote_thresholds needs at least one entry".to_string(),
            ));
        }
        Ok(())
    }
}
