//! In-memory catalog used by the unit tests of this crate.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use catalog_client::{Catalog, CatalogError, CatalogQuery};
use taste_model::{Genre, Movie, MovieId};

/// Answers from a fixed table and records every query it receives.
///
/// Queries not in the table return an empty page; queries marked as failing
/// return a 500 status error.
#[derive(Default)]
pub struct ScriptedCatalog {
    responses: HashMap<CatalogQuery, Vec<Movie>>,
    failing: Vec<CatalogQuery>,
    calls: Mutex<Vec<CatalogQuery>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, query: CatalogQuery, movies: Vec<Movie>) -> Self {
        self.responses.insert(query, movies);
        self
    }

    pub fn with_failure(mut self, query: CatalogQuery) -> Self {
        self.failing.push(query);
        self
    }

    pub fn calls(&self) -> Vec<CatalogQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Movie>, CatalogError> {
        self.calls.lock().unwrap().push(query.clone());
        if self.failing.contains(query) {
            return Err(CatalogError::Status {
                status: 500,
                body: "scripted failure".to_string(),
            });
        }
        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}

pub fn movie(id: MovieId, genres: &[Genre]) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        overview: "An overview".to_string(),
        poster_path: Some(format!("/{id}.jpg")),
        release_date: Some("2010-01-01".to_string()),
        vote_average: 7.0,
        vote_count: 1_000,
        popularity: 50.0,
        genre_ids: genres.iter().map(|g| g.catalog_id()).collect(),
    }
}

pub fn movies(ids: std::ops::Range<MovieId>, genres: &[Genre]) -> Vec<Movie> {
    ids.map(|id| movie(id, genres)).collect()
}
