//! Ranking pipeline for movie candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Scorer for the composite relevance score
//! - MMR selection for a diverse final list
//! - Reason lines explaining each pick
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove unwanted candidates (thinly-voted records)
//! 2. Scorer ranks what is left against the user's profile
//! 3. MMR picks the final `k` from the best-ranked slice
//! 4. Reasons are attached for display
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, Scorer, build_reason, mmr_select};
//! use pipeline::filters::VoteFloorFilter;
//!
//! let filters = FilterPipeline::new().add_filter(VoteFloorFilter::new());
//! let filtered = filters.apply(candidates, &profile)?;
//!
//! let mut ranked = Scorer::new().rank(&profile, filtered);
//! ranked.truncate(90);
//! for pick in mmr_select(ranked, 5, 0.78) {
//!     println!("{}: {}", pick.movie().title, build_reason(&profile, pick.movie()));
//! }
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod mmr;
pub mod reasons;
pub mod scoring;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use filters::VoteFloorFilter;
pub use mmr::{DEFAULT_LAMBDA, mmr_select, similarity};
pub use reasons::build_reason;
pub use scoring::{ScoreBreakdown, ScoreWeights, ScoredCandidate, Scorer, bayesian_rating};
pub use traits::Filter;
