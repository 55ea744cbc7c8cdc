//! Filter implementations for the candidate pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod vote_floor;

// Re-export for convenience
pub use vote_floor::VoteFloorFilter;
