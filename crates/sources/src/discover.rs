//! Discover Source - genre-driven candidate collection
//!
//! Queries the catalog's discovery endpoint with the user's strongest genres.
//!
//! ## Algorithm
//! 1. Take the top ≤3 genres with positive weight
//! 2. Query each genre on its own
//! 3. Query the top-2 combination (if there are 2+ genres)
//! 4. Query the top-3 combination (if there are 3 genres)
//! 5. Keep the first `per_call` results of each query and merge by id
//!
//! Combined queries are AND-ed by the catalog, so they surface movies that
//! blend the user's genres. Any failure here fails the whole collection: the
//! pipeline has nothing to rank without it.

use std::sync::Arc;

use catalog_client::{Catalog, CatalogError, CatalogQuery};
use taste_model::UserProfile;
use tracing::{debug, info, instrument};

use crate::types::{CandidatePool, CandidateSource};

/// Number of top genres used for discovery
pub const DISCOVER_GENRES: usize = 3;

/// Discovery queries for a profile, in the order they are issued
pub fn discover_queries(profile: &UserProfile, language: &str, page: u32) -> Vec<CatalogQuery> {
    let top = profile.top_genres(DISCOVER_GENRES);

    let mut queries: Vec<CatalogQuery> = top
        .iter()
        .map(|genre| CatalogQuery::discover(std::slice::from_ref(genre), language, page))
        .collect();

    if top.len() >= 2 {
        queries.push(CatalogQuery::discover(&top[..2], language, page));
    }
    if top.len() >= 3 {
        queries.push(CatalogQuery::discover(&top[..3], language, page));
    }

    queries
}

/// Collects the initial candidate pool from genre discovery
pub struct DiscoverSource<C> {
    catalog: Arc<C>,

    /// Results kept per discovery query
    per_call: usize,

    language: String,
    page: u32,
}

impl<C: Catalog> DiscoverSource<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            per_call: 55,
            language: "en-US".to_string(),
            page: 1,
        }
    }

    /// Configure results kept per query (default: 55)
    pub fn with_per_call(mut self, per_call: usize) -> Self {
        self.per_call = per_call;
        self
    }

    /// Configure the catalog language (default: en-US)
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Configure the result page (default: 1)
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Run every discovery query and merge the results.
    ///
    /// Queries run one after another; a later query overwrites earlier
    /// records with the same id.
    #[instrument(skip(self, profile), fields(catalog = self.catalog.name()))]
    pub async fn collect(&self, profile: &UserProfile) -> Result<CandidatePool, CatalogError> {
        let queries = discover_queries(profile, &self.language, self.page);
        debug!("Running {} discovery queries", queries.len());

        let mut pool = CandidatePool::new();
        for query in &queries {
            let mut movies = self.catalog.fetch(query).await?;
            movies.truncate(self.per_call);
            debug!(query = %query, results = movies.len(), "Discovery query done");
            pool.extend_from(movies, CandidateSource::Discover);
        }

        info!("Collected {} candidates from discovery", pool.len());
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedCatalog, movies};
    use taste_model::{Genre, GenreWeights, TraitVector};

    fn profile(weights: &[(Genre, f64)]) -> UserProfile {
        let mut genre_weights = GenreWeights::zero();
        for &(genre, weight) in weights {
            genre_weights[genre] = weight;
        }
        UserProfile {
            genre_weights,
            axes: TraitVector::NEUTRAL,
        }
    }

    #[test]
    fn test_single_genre_issues_one_query() {
        let queries = discover_queries(&profile(&[(Genre::Action, 1.0)]), "en-US", 1);
        assert_eq!(queries, vec![CatalogQuery::discover(&[Genre::Action], "en-US", 1)]);
    }

    #[test]
    fn test_three_genres_issue_singles_and_combos() {
        let p = profile(&[(Genre::Drama, 0.5), (Genre::SciFi, 0.3), (Genre::Comedy, 0.2)]);
        let queries = discover_queries(&p, "en-US", 1);

        let genres: Vec<String> = queries
            .iter()
            .map(|q| match q {
                CatalogQuery::Discover { genres, .. } => genres.clone(),
                other => panic!("unexpected query {other}"),
            })
            .collect();
        assert_eq!(genres, vec!["18", "878", "35", "18,878", "18,878,35"]);
    }

    #[tokio::test]
    async fn test_collect_truncates_and_merges() {
        let p = profile(&[(Genre::Drama, 0.8), (Genre::Romance, 0.2)]);
        let catalog = ScriptedCatalog::new()
            .with_response(
                CatalogQuery::discover(&[Genre::Drama], "en-US", 1),
                movies(1..61, &[Genre::Drama]),
            )
            .with_response(
                CatalogQuery::discover(&[Genre::Romance], "en-US", 1),
                movies(50..70, &[Genre::Romance]),
            );
        let catalog = Arc::new(catalog);

        let pool = DiscoverSource::new(Arc::clone(&catalog))
            .collect(&p)
            .await
            .unwrap();

        // 55 drama (1..=55) + romance 50..70, overlapping on 50..=55
        assert_eq!(pool.len(), 55 + 14);
        assert_eq!(catalog.calls().len(), 3);
        assert!(pool.iter().all(|c| c.source == CandidateSource::Discover));
    }

    #[tokio::test]
    async fn test_collect_failure_is_fatal() {
        let p = profile(&[(Genre::Action, 1.0)]);
        let failing = CatalogQuery::discover(&[Genre::Action], "en-US", 1);
        let catalog = Arc::new(ScriptedCatalog::new().with_failure(failing));

        let result = DiscoverSource::new(catalog).collect(&p).await;
        assert!(matches!(result, Err(CatalogError::Status { status: 500, .. })));
    }
}
