//! Client for the remote movie catalog (TMDB).
//!
//! This crate is the boundary between the recommender and the metadata
//! service. It handles:
//! - Describing catalog requests as hashable values ([`CatalogQuery`])
//! - The [`Catalog`] trait every catalog backend implements
//! - The HTTP implementation against TMDB ([`TmdbClient`])
//! - Session-lifetime memoization of identical requests ([`CachedCatalog`])
//!
//! ## Failure model
//! Every call returns `Result<Vec<Movie>, CatalogError>`. An empty `Vec` is a
//! successful "no results"; an `Err` is a real failure. Whether a failure is
//! fatal is decided by the caller, not here.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use taste_model::{Genre, Movie, MovieId};

pub mod cache;
pub mod error;
pub mod tmdb;

pub use cache::CachedCatalog;
pub use error::CatalogError;
pub use tmdb::TmdbClient;

/// One request against the catalog.
///
/// The full parameter tuple is the identity of the request, which makes this
/// type usable directly as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogQuery {
    /// Popular movies carrying every genre in `genres` (comma separated catalog ids)
    Discover {
        genres: String,
        language: String,
        page: u32,
    },
    /// Movies the catalog recommends for `movie_id`
    Recommendations {
        movie_id: MovieId,
        language: String,
        page: u32,
    },
    /// Movies the catalog considers similar to `movie_id`
    Similar {
        movie_id: MovieId,
        language: String,
        page: u32,
    },
}

impl CatalogQuery {
    /// Discover query for one or more genres (combined with AND by the catalog)
    pub fn discover(genres: &[Genre], language: impl Into<String>, page: u32) -> Self {
        let genres = genres
            .iter()
            .map(|genre| genre.catalog_id().to_string())
            .collect::<Vec<_>>()
            .join(",");
        CatalogQuery::Discover {
            genres,
            language: language.into(),
            page,
        }
    }

    pub fn recommendations(movie_id: MovieId, language: impl Into<String>, page: u32) -> Self {
        CatalogQuery::Recommendations {
            movie_id,
            language: language.into(),
            page,
        }
    }

    pub fn similar(movie_id: MovieId, language: impl Into<String>, page: u32) -> Self {
        CatalogQuery::Similar {
            movie_id,
            language: language.into(),
            page,
        }
    }

    /// Short name of the query shape, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogQuery::Discover { .. } => "discover",
            CatalogQuery::Recommendations { .. } => "recommendations",
            CatalogQuery::Similar { .. } => "similar",
        }
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogQuery::Discover { genres, language, page } => {
                write!(f, "discover(genres={genres}, language={language}, page={page})")
            }
            CatalogQuery::Recommendations { movie_id, language, page } => {
                write!(f, "recommendations(movie={movie_id}, language={language}, page={page})")
            }
            CatalogQuery::Similar { movie_id, language, page } => {
                write!(f, "similar(movie={movie_id}, language={language}, page={page})")
            }
        }
    }
}

/// A source of movie records.
///
/// ## Design Note
/// - `Send + Sync` so a catalog can be shared with spawned tasks
/// - One method keyed by [`CatalogQuery`] keeps wrappers (caching, fakes)
///   trivial to write
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Name of this backend (for logging/debugging)
    fn name(&self) -> &str;

    /// Run a query and return the movies of the requested page.
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Movie>, CatalogError>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Movie>, CatalogError> {
        (**self).fetch(query).await
    }
}
