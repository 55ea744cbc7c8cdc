//! Core domain types for the taste model.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - Type aliases for catalog identifiers (MovieId, CatalogGenreId)
//! - `Genre` and `Axis` enums for the fixed key sets
//! - `TraitVector` and `GenreWeights`, fixed-size tables indexed by those enums
//! - `UserProfile`, the derived taste profile
//! - `Movie`, a catalog record as fetched from the metadata service
//!
//! Every genre/axis lookup is a plain array index, so no access can miss a key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a movie in the external catalog
pub type MovieId = u64;

/// Genre identifier as used by the external catalog (e.g. 28 = action)
pub type CatalogGenreId = u32;

/// Base URL prepended to catalog poster paths
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

// =============================================================================
// Genre
// =============================================================================

/// The genres the quiz can vote for.
///
/// Declaration order doubles as the tie-break priority when two genres carry
/// the same weight (see [`GENRE_PRIORITY`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    #[serde(rename = "sf")]
    SciFi,
    Romance,
    Fantasy,
}

/// Order used to break ties between equally weighted genres.
pub const GENRE_PRIORITY: [Genre; Genre::COUNT] = Genre::ALL;

impl Genre {
    pub const COUNT: usize = 6;

    pub const ALL: [Genre; Genre::COUNT] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::SciFi,
        Genre::Romance,
        Genre::Fantasy,
    ];

    /// Position of this genre in every genre-indexed table
    pub fn index(self) -> usize {
        self as usize
    }

    /// The catalog's genre id for this genre
    pub fn catalog_id(self) -> CatalogGenreId {
        match self {
            Genre::Action => 28,
            Genre::Comedy => 35,
            Genre::Drama => 18,
            Genre::SciFi => 878,
            Genre::Romance => 10749,
            Genre::Fantasy => 14,
        }
    }

    /// Map a catalog genre id back to a quiz genre.
    ///
    /// Returns `None` for catalog genres the quiz does not model (horror, crime, ...).
    pub fn from_catalog_id(id: CatalogGenreId) -> Option<Genre> {
        Genre::ALL.into_iter().find(|genre| genre.catalog_id() == id)
    }

    /// Stable lowercase key (matches the serde representation)
    pub fn key(self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Comedy => "comedy",
            Genre::Drama => "drama",
            Genre::SciFi => "sf",
            Genre::Romance => "romance",
            Genre::Fantasy => "fantasy",
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::SciFi => "SF",
            Genre::Romance => "Romance",
            Genre::Fantasy => "Fantasy",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Axis
// =============================================================================

/// Continuous mood/style dimensions, independent of genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Light,
    Pace,
    Escape,
    Emotion,
    Complexity,
    Relationship,
}

impl Axis {
    pub const COUNT: usize = 6;

    pub const ALL: [Axis; Axis::COUNT] = [
        Axis::Light,
        Axis::Pace,
        Axis::Escape,
        Axis::Emotion,
        Axis::Complexity,
        Axis::Relationship,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Axis::Light => "light",
            Axis::Pace => "pace",
            Axis::Escape => "escape",
            Axis::Emotion => "emotion",
            Axis::Complexity => "complexity",
            Axis::Relationship => "relationship",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Light => "Lightness",
            Axis::Pace => "Pace",
            Axis::Escape => "Escapism",
            Axis::Emotion => "Emotion",
            Axis::Complexity => "Complexity",
            Axis::Relationship => "Relationships",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// TraitVector
// =============================================================================

/// One value in [0, 1] per [`Axis`].
///
/// Used both for static genre archetypes and for derived per-movie and
/// per-user vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitVector([f64; Axis::COUNT]);

impl TraitVector {
    /// Midpoint on every axis
    pub const NEUTRAL: TraitVector = TraitVector([0.5; Axis::COUNT]);

    /// Build from values in [`Axis::ALL`] order
    pub const fn new(values: [f64; Axis::COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    pub fn values(&self) -> &[f64; Axis::COUNT] {
        &self.0
    }

    /// Iterate `(axis, value)` pairs in [`Axis::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, f64)> + '_ {
        Axis::ALL.into_iter().map(move |axis| (axis, self.get(axis)))
    }

    /// Copy with every axis clamped into [0, 1]
    pub fn clamped(&self) -> Self {
        Self(self.0.map(|v| v.clamp(0.0, 1.0)))
    }

    /// Euclidean distance divided by √(axis count), so the result is in [0, 1]
    /// for vectors whose components are in [0, 1].
    pub fn normalized_distance(&self, other: &TraitVector) -> f64 {
        let dist2: f64 = self
            .0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum();
        dist2.sqrt() / (Axis::COUNT as f64).sqrt()
    }
}

impl Default for TraitVector {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl Index<Axis> for TraitVector {
    type Output = f64;

    fn index(&self, axis: Axis) -> &f64 {
        &self.0[axis.index()]
    }
}

impl IndexMut<Axis> for TraitVector {
    fn index_mut(&mut self, axis: Axis) -> &mut f64 {
        &mut self.0[axis.index()]
    }
}

// =============================================================================
// GenreWeights
// =============================================================================

/// One non-negative weight per [`Genre`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GenreWeights([f64; Genre::COUNT]);

impl GenreWeights {
    pub const fn new(values: [f64; Genre::COUNT]) -> Self {
        Self(values)
    }

    pub fn zero() -> Self {
        Self([0.0; Genre::COUNT])
    }

    pub fn uniform() -> Self {
        Self([1.0 / Genre::COUNT as f64; Genre::COUNT])
    }

    pub fn get(&self, genre: Genre) -> f64 {
        self.0[genre.index()]
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Scale so the weights sum to 1.
    ///
    /// Returns `None` when the sum is not positive; callers pick their own
    /// fallback distribution.
    pub fn normalized(&self) -> Option<Self> {
        let total = self.sum();
        if total <= 0.0 {
            return None;
        }
        Some(Self(self.0.map(|v| v / total)))
    }

    /// Iterate `(genre, weight)` pairs in [`Genre::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Genre, f64)> + '_ {
        Genre::ALL.into_iter().map(move |genre| (genre, self.get(genre)))
    }

    /// All genres sorted by weight (highest first), ties broken by
    /// [`GENRE_PRIORITY`].
    pub fn ranked(&self) -> Vec<(Genre, f64)> {
        let mut ranked: Vec<(Genre, f64)> = GENRE_PRIORITY
            .into_iter()
            .map(|genre| (genre, self.get(genre)))
            .collect();
        // Stable sort keeps the priority order among equal weights
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

impl Index<Genre> for GenreWeights {
    type Output = f64;

    fn index(&self, genre: Genre) -> &f64 {
        &self.0[genre.index()]
    }
}

impl IndexMut<Genre> for GenreWeights {
    fn index_mut(&mut self, genre: Genre) -> &mut f64 {
        &mut self.0[genre.index()]
    }
}

// =============================================================================
// UserProfile
// =============================================================================

/// A user's taste: a genre distribution plus a position on every trait axis.
///
/// Invariants: `genre_weights` sums to 1.0, `axes` are within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub genre_weights: GenreWeights,
    pub axes: TraitVector,
}

impl UserProfile {
    /// Up to `n` genres with positive weight, strongest first
    pub fn top_genres(&self, n: usize) -> Vec<Genre> {
        self.genre_weights
            .ranked()
            .into_iter()
            .filter(|(_, weight)| *weight > 0.0)
            .take(n)
            .map(|(genre, _)| genre)
            .collect()
    }

    /// The single strongest genre, if any genre has weight
    pub fn top_genre(&self) -> Option<Genre> {
        self.top_genres(1).into_iter().next()
    }
}

// =============================================================================
// Movie
// =============================================================================

/// A movie record as returned by the catalog.
///
/// Missing fields are defaulted at decode time (empty overview, no poster,
/// zero votes); they are never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    /// `YYYY-MM-DD` as sent by the catalog; may be empty or malformed
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    /// Average rating on a 0-10 scale
    pub vote_average: f64,
    pub vote_count: u32,
    pub popularity: f64,
    pub genre_ids: Vec<CatalogGenreId>,
}

impl Movie {
    /// Release year taken from the first four characters of the release date
    pub fn year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }

    /// Quiz genres this movie belongs to, in catalog order.
    ///
    /// Catalog genres outside the quiz model are skipped.
    pub fn genres(&self) -> impl Iterator<Item = Genre> + '_ {
        self.genre_ids.iter().filter_map(|&id| Genre::from_catalog_id(id))
    }

    pub fn has_poster(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn has_overview(&self) -> bool {
        !self.overview.trim().is_empty()
    }

    pub fn poster_url(&self) -> Option<String> {
        if !self.has_poster() {
            return None;
        }
        self.poster_path
            .as_deref()
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }
}
