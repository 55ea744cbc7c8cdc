//! Graph Source - expansion through the catalog's movie graph
//!
//! "People who liked this seed also liked..." via the catalog's own
//! recommendation and similarity relations.
//!
//! ## Algorithm
//! For each seed movie:
//! 1. Ask for recommendations and similar movies (both at once)
//! 2. Keep the first `per_seed` results of each
//! 3. Merge by id, recommendations before similar
//!
//! Every relation call may fail on its own. A failed call is logged and
//! contributes nothing; expansion as a whole never fails.

use std::sync::Arc;

use catalog_client::{Catalog, CatalogError, CatalogQuery};
use taste_model::Movie;
use tracing::{debug, info, instrument, warn};

use crate::types::{CandidatePool, CandidateSource};

/// Expands a set of seed movies into related candidates
pub struct GraphSource<C> {
    catalog: Arc<C>,

    /// Results kept per relation call
    per_seed: usize,

    language: String,
    page: u32,
}

impl<C: Catalog> GraphSource<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            per_seed: 35,
            language: "en-US".to_string(),
            page: 1,
        }
    }

    /// Configure results kept per relation call (default: 35)
    pub fn with_per_seed(mut self, per_seed: usize) -> Self {
        self.per_seed = per_seed;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Expand all seeds.
    ///
    /// The two relation calls of a seed are awaited together; results are
    /// merged in a fixed order so the pool is the same as with sequential
    /// calls.
    #[instrument(skip(self, seeds), fields(seeds = seeds.len()))]
    pub async fn expand(&self, seeds: &[Movie]) -> CandidatePool {
        let mut pool = CandidatePool::new();
        let mut failures = 0usize;

        for seed in seeds {
            let recommendations_query =
                CatalogQuery::recommendations(seed.id, self.language.as_str(), self.page);
            let similar_query = CatalogQuery::similar(seed.id, self.language.as_str(), self.page);

            let (recommendations, similar) = tokio::join!(
                self.catalog.fetch(&recommendations_query),
                self.catalog.fetch(&similar_query),
            );

            for (query, result, source) in [
                (&recommendations_query, recommendations, CandidateSource::Recommendations),
                (&similar_query, similar, CandidateSource::Similar),
            ] {
                match self.keep(query, result) {
                    Some(movies) => pool.extend_from(movies, source),
                    None => failures += 1,
                }
            }
        }

        info!(
            "Expanded {} seeds into {} candidates ({} failed calls)",
            seeds.len(),
            pool.len(),
            failures
        );
        pool
    }

    /// Truncate a successful result, or log and drop a failed one
    fn keep(
        &self,
        query: &CatalogQuery,
        result: Result<Vec<Movie>, CatalogError>,
    ) -> Option<Vec<Movie>> {
        match result {
            Ok(mut movies) => {
                movies.truncate(self.per_seed);
                debug!(query = %query, results = movies.len(), "Expansion call done");
                Some(movies)
            }
            Err(error) => {
                warn!(query = %query, error = %error, "Expansion call failed, skipping");
                None
            }
        }
    }
}
