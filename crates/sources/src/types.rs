//! Core types for candidate generation
//!
//! This module defines the shared types used by the candidate sources and
//! the ranking pipeline downstream.

use std::collections::HashMap;

use taste_model::{Movie, MovieId};

/// Which catalog query produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Genre discovery (single genre or genre combination)
    Discover,
    /// "Recommended for" expansion of a seed
    Recommendations,
    /// "Similar to" expansion of a seed
    Similar,
}

impl CandidateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateSource::Discover => "discover",
            CandidateSource::Recommendations => "recommendations",
            CandidateSource::Similar => "similar",
        }
    }
}

/// A candidate movie for recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub movie: Movie,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(movie: Movie, source: CandidateSource) -> Self {
        Self { movie, source }
    }

    pub fn id(&self) -> MovieId {
        self.movie.id
    }
}

/// Candidates keyed by movie id.
///
/// Iteration follows first-insertion order. Inserting an id that is already
/// present replaces the stored candidate wholesale but keeps its position, so
/// later sources win on content while ranking ties still break the same way
/// from run to run.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    positions: HashMap<MovieId, usize>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns `true` if the id was new
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        match self.positions.get(&candidate.id()) {
            Some(&position) => {
                self.candidates[position] = candidate;
                false
            }
            None => {
                self.positions.insert(candidate.id(), self.candidates.len());
                self.candidates.push(candidate);
                true
            }
        }
    }

    /// Merge a list of movies from one source
    pub fn extend_from(&mut self, movies: Vec<Movie>, source: CandidateSource) {
        for movie in movies {
            self.insert(Candidate::new(movie, source));
        }
    }

    pub fn get(&self, id: MovieId) -> Option<&Candidate> {
        self.positions.get(&id).map(|&position| &self.candidates[position])
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn into_vec(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl FromIterator<Candidate> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        let mut pool = CandidatePool::new();
        for candidate in iter {
            pool.insert(candidate);
        }
        pool
    }
}

impl Extend<Candidate> for CandidatePool {
    fn extend<I: IntoIterator<Item = Candidate>>(&mut self, iter: I) {
        for candidate in iter {
            self.insert(candidate);
        }
    }
}

impl IntoIterator for CandidatePool {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pool_overwrites_in_place() {
        let mut pool = CandidatePool::new();
        assert!(pool.insert(Candidate::new(movie(1, "first"), CandidateSource::Discover)));
        assert!(pool.insert(Candidate::new(movie(2, "second"), CandidateSource::Discover)));
        assert!(!pool.insert(Candidate::new(movie(1, "replaced"), CandidateSource::Similar)));

        assert_eq!(pool.len(), 2);
        let ids: Vec<MovieId> = pool.iter().map(Candidate::id).collect();
        assert_eq!(ids, vec![1, 2]);

        let first = pool.get(1).unwrap();
        assert_eq!(first.movie.title, "replaced");
        assert_eq!(first.source, CandidateSource::Similar);
    }

    #[test]
    fn test_pool_from_iterator_dedups() {
        let pool: CandidatePool = [3, 1, 3, 2]
            .into_iter()
            .map(|id| Candidate::new(movie(id, "m"), CandidateSource::Recommendations))
            .collect();

        let ids: Vec<MovieId> = pool.into_iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
