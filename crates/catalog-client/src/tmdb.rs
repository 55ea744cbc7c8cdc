//! TMDB implementation of [`Catalog`].
//!
//! Endpoints used:
//! - `GET /discover/movie` (genre discovery, popularity descending, no adult titles)
//! - `GET /movie/{id}/recommendations`
//! - `GET /movie/{id}/similar`
//!
//! Every request carries `api_key`, `language` and `page` as query parameters
//! and is bounded by a 10 second timeout.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use taste_model::{CatalogGenreId, Movie, MovieId};
use tracing::{debug, warn};

use crate::{Catalog, CatalogError, CatalogQuery};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the TMDB v3 API
#[derive(Clone)]
pub struct TmdbClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// Create a client against the public TMDB API.
    ///
    /// Fails with [`CatalogError::MissingCredential`] when `api_key` is blank;
    /// no request is ever attempted without a key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CatalogError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (proxies, mock servers)
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingCredential);
        }

        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Path and query parameters for a catalog query (without the API key)
    fn request_parts(query: &CatalogQuery) -> (String, Vec<(&'static str, String)>) {
        match query {
            CatalogQuery::Discover { genres, language, page } => (
                "/discover/movie".to_string(),
                vec![
                    ("with_genres", genres.clone()),
                    ("language", language.clone()),
                    ("sort_by", "popularity.desc".to_string()),
                    ("include_adult", "false".to_string()),
                    ("page", page.to_string()),
                ],
            ),
            CatalogQuery::Recommendations { movie_id, language, page } => (
                format!("/movie/{movie_id}/recommendations"),
                vec![("language", language.clone()), ("page", page.to_string())],
            ),
            CatalogQuery::Similar { movie_id, language, page } => (
                format!("/movie/{movie_id}/similar"),
                vec![("language", language.clone()), ("page", page.to_string())],
            ),
        }
    }
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Movie>, CatalogError> {
        let (path, mut params) = Self::request_parts(query);
        params.push(("api_key", self.api_key.clone()));
        let url = format!("{}{}", self.base_url, path);

        debug!(query = %query, "Querying catalog");

        let response = self.http_client.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(query = %query, status = status.as_u16(), "Catalog returned error status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let page: TmdbPage = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        let total = page.results.len();
        let movies: Vec<Movie> = page
            .results
            .into_iter()
            .filter_map(TmdbMovie::into_movie)
            .collect();

        if movies.len() != total {
            debug!(
                query = %query,
                dropped = total - movies.len(),
                "Dropped catalog records without an id"
            );
        }

        Ok(movies)
    }
}

/// Paged list envelope shared by all three endpoints
#[derive(Debug, Deserialize)]
struct TmdbPage {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

/// Raw TMDB movie record; every field may be missing or null
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TmdbMovie {
    id: Option<i64>,
    title: Option<String>,
    original_title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<i64>,
    popularity: Option<f64>,
    genre_ids: Option<Vec<CatalogGenreId>>,
}

impl TmdbMovie {
    /// Convert to a domain movie, defaulting every missing field.
    ///
    /// Records without a positive id cannot be deduplicated and are dropped.
    fn into_movie(self) -> Option<Movie> {
        let id = MovieId::try_from(self.id?).ok().filter(|id| *id > 0)?;

        let title = self
            .title
            .filter(|t| !t.is_empty())
            .or(self.original_title)
            .unwrap_or_default();

        Some(Movie {
            id,
            title,
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.filter(|d| !d.is_empty()),
            poster_path: self.poster_path.filter(|p| !p.is_empty()),
            vote_average: self.vote_average.unwrap_or(0.0).max(0.0),
            vote_count: self.vote_count.unwrap_or(0).clamp(0, u32::MAX as i64) as u32,
            popularity: self.popularity.unwrap_or(0.0).max(0.0),
            genre_ids: self.genre_ids.unwrap_or_default(),
        })
    }
}
