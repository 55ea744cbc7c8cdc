//! # Sources Crate
//!
//! Everything that happens before ranking: turning quiz answers into a
//! profile, bending it with feedback, and pulling candidate movies out of the
//! catalog.
//!
//! ## Components
//!
//! ### Profile Builder
//! Quiz answers → genre distribution + trait axes ([`build_profile`]).
//!
//! ### Feedback
//! Bounded like/dislike accumulator ([`FeedbackState`]) and the pure
//! [`apply_feedback`] that derives a working profile from it.
//!
//! ### Discover Source (primary)
//! Genre discovery for the user's top genres and their combinations:
//! - One query per top genre, plus top-2 and top-3 combinations
//! - Any failure is fatal
//!
//! ### Graph Source (expansion)
//! Recommendations and similar movies for the best seeds:
//! - Each call may fail on its own and is skipped when it does
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{DiscoverSource, GraphSource, build_profile};
//! use catalog_client::{CachedCatalog, TmdbClient};
//! use std::sync::Arc;
//!
//! let profile = build_profile(&answers)?;
//! let catalog = Arc::new(CachedCatalog::new(TmdbClient::new(api_key)?));
//!
//! let discover = DiscoverSource::new(catalog.clone()).with_per_call(55);
//! let graph = GraphSource::new(catalog.clone()).with_per_seed(35);
//!
//! let pool = discover.collect(&profile).await?;
//! let expanded = graph.expand(&seeds).await;
//! ```

// Public modules
pub mod discover;
pub mod feedback;
pub mod graph;
pub mod profile;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use discover::{DiscoverSource, discover_queries};
pub use feedback::{FeedbackState, apply_feedback};
pub use graph::GraphSource;
pub use profile::{build_profile, describe_profile, top_genre_label, uniform_answers};
pub use types::{Candidate, CandidatePool, CandidateSource};
