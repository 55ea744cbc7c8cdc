//! Errors surfaced by a recommendation request or session.

use catalog_client::CatalogError;
use taste_model::QuizError;
use thiserror::Error;

/// Everything that can stop a recommendation request
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The quiz answers could not be turned into a profile
    #[error("Invalid quiz answers: {0}")]
    Quiz(#[from] QuizError),

    /// Primary candidate collection failed (missing key, network, bad status)
    #[error("Could not collect candidates: {0}")]
    Catalog(#[from] CatalogError),

    /// A refresh or feedback call came before any quiz was submitted
    #[error("No taste profile yet; complete the quiz first")]
    NoProfile,

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A ranking filter failed
    #[error("Ranking failed: {0:#}")]
    Pipeline(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
