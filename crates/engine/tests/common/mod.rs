//! Shared fixtures for the engine integration tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use catalog_client::{Catalog, CatalogError, CatalogQuery};
use taste_model::{Genre, Movie, MovieId};

/// Results per discovery query
pub const DISCOVER_RESULTS: u64 = 30;
/// Results per relation call
pub const RELATION_RESULTS: u64 = 20;

/// Deterministic in-memory catalog that records every query.
///
/// - Discover: ids `first_genre_id * 100 + i`, carrying all requested genres
/// - Recommendations: ids `1_000_000 + seed * 100 + i`
/// - Similar: ids `2_000_000 + seed * 100 + i`
#[derive(Default)]
pub struct FakeCatalog {
    calls: Mutex<Vec<CatalogQuery>>,
    fail_discover: bool,
    failing_seeds: HashSet<MovieId>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every discovery query fails
    pub fn failing_discover(mut self) -> Self {
        self.fail_discover = true;
        self
    }

    /// Every relation call for this seed fails
    pub fn failing_seed(mut self, seed: MovieId) -> Self {
        self.failing_seeds.insert(seed);
        self
    }

    pub fn calls(&self) -> Vec<CatalogQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn discover_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|q| match q {
                CatalogQuery::Discover { genres, .. } => Some(genres),
                _ => None,
            })
            .collect()
    }

    fn discover(genres: &str) -> Vec<Movie> {
        let genre_ids: Vec<u32> = genres.split(',').filter_map(|g| g.parse().ok()).collect();
        let first = genre_ids.first().copied().unwrap_or(0) as u64;

        (0..DISCOVER_RESULTS)
            .map(|i| movie(first * 100 + i, genre_ids.clone(), i))
            .collect()
    }

    fn related(base: MovieId, seed: MovieId) -> Vec<Movie> {
        (0..RELATION_RESULTS)
            .map(|i| {
                movie(
                    base + seed * 100 + i,
                    vec![Genre::ALL[(i as usize) % Genre::COUNT].catalog_id()],
                    i,
                )
            })
            .collect()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Movie>, CatalogError> {
        self.calls.lock().unwrap().push(query.clone());

        match query {
            CatalogQuery::Discover { genres, .. } => {
                if self.fail_discover {
                    return Err(CatalogError::Status {
                        status: 503,
                        body: "unavailable".to_string(),
                    });
                }
                Ok(Self::discover(genres))
            }
            CatalogQuery::Recommendations { movie_id, .. }
            | CatalogQuery::Similar { movie_id, .. }
                if self.failing_seeds.contains(movie_id) =>
            {
                Err(CatalogError::Decode("broken page".to_string()))
            }
            CatalogQuery::Recommendations { movie_id, .. } => {
                Ok(Self::related(1_000_000, *movie_id))
            }
            CatalogQuery::Similar { movie_id, .. } => Ok(Self::related(2_000_000, *movie_id)),
        }
    }
}

/// A complete record; `i` varies rating, votes and year
pub fn movie(id: MovieId, genre_ids: Vec<u32>, i: u64) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        overview: "A story".to_string(),
        release_date: Some(format!("{}-06-01", 1990 + i % 30)),
        poster_path: Some(format!("/{id}.jpg")),
        vote_average: 6.0 + (i % 30) as f64 / 10.0,
        vote_count: 400 + (i as u32) * 10,
        popularity: 10.0 + i as f64,
        genre_ids,
    }
}
