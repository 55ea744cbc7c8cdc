//! Engine crate for the quiz-driven movie recommender.
//!
//! This crate contains the orchestrator that coordinates all components
//! of the recommendation pipeline, the per-user [`Session`], and the
//! pipeline configuration.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod session;

pub use config::RecommendConfig;
pub use error::{RecommendError, Result};
pub use orchestrator::{PipelineStats, Recommendation, RecommendationOrchestrator, Recommendations};
pub use session::Session;
