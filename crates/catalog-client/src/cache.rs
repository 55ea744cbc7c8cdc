//! Memoizing wrapper around any [`Catalog`].
//!
//! Identical queries (same kind, genres/movie, language, page) are served from
//! memory for the lifetime of the wrapper. There is no expiry and no size
//! bound; a wrapper is meant to live as long as one user session.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use taste_model::Movie;
use tracing::debug;

use crate::{Catalog, CatalogError, CatalogQuery};

/// Caches successful responses of the wrapped catalog.
///
/// ## Design Note
/// The lock is a plain `std::sync::Mutex` and is only held to read or insert
/// an entry, never across the inner `fetch().await`. Two concurrent misses for
/// the same query may both reach the inner catalog; the second insert wins.
pub struct CachedCatalog<C> {
    inner: C,
    entries: Mutex<HashMap<CatalogQuery, Vec<Movie>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<C: Catalog> CachedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of cached queries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CatalogQuery, Vec<Movie>>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<C: Catalog> Catalog for CachedCatalog<C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<Movie>, CatalogError> {
        let cached = self.lock().get(query).cloned();
        if let Some(movies) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(query = %query, "Catalog cache hit");
            return Ok(movies);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let movies = self.inner.fetch(query).await?;
        self.lock().insert(query.clone(), movies.clone());
        Ok(movies)
    }
}
