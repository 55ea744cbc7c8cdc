//! Ordered composition of [`Filter`]s.

use crate::traits::Filter;
use anyhow::Result;
use sources::Candidate;
use taste_model::UserProfile;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(VoteFloorFilter::new().with_min_pool(25));
///
/// let filtered = pipeline.apply(candidates, &profile)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter in insertion order, feeding each the previous output.
    ///
    /// Stops at the first filter error.
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, profile)?;
            debug!(filter = filter.name(), before, after = current.len(), "Filter applied");
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
