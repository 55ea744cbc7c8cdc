//! The [`Filter`] seam of the candidate pipeline.

use anyhow::Result;
use sources::Candidate;
use taste_model::UserProfile;

/// A stage that drops candidates from a pool.
///
/// ## Design Note
/// - `Send + Sync` so a pipeline can live behind an `Arc` in the orchestrator
/// - Filters own the input `Vec` and hand back the survivors
/// - Survivors keep their relative order; ranking ties rely on it
pub trait Filter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Filter `candidates` for the given working profile.
    fn apply(&self, candidates: Vec<Candidate>, profile: &UserProfile) -> Result<Vec<Candidate>>;
}
