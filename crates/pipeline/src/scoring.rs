//! Composite relevance scoring.
//!
//! A movie's score blends how well it fits the user with how good it is:
//!
//! ```text
//! score = w_genre · genre_match
//!       + w_align · trait_alignment
//!       + w_quality · bayesian_rating / 10
//!       + w_pop · popularity
//!       - completeness_penalty
//! ```
//!
//! Genre fit dominates, alignment and quality come second, popularity only
//! breaks near-ties. Every sub-score except the penalty is in [0, 1].

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sources::Candidate;
use taste_model::{GenreWeights, Movie, MovieId, TraitVector, UserProfile, movie_traits};

// =============================================================================
// Constants
// =============================================================================

/// Prior mean rating (C) the Bayesian average shrinks toward
pub const BAYES_PRIOR_MEAN: f64 = 6.8;

/// Prior weight in votes (m)
pub const BAYES_PRIOR_VOTES: f64 = 500.0;

/// Popularity at which the popularity sub-score saturates
pub const POPULARITY_CEILING: f64 = 1000.0;

pub const MISSING_POSTER_PENALTY: f64 = 0.20;
pub const MISSING_OVERVIEW_PENALTY: f64 = 0.15;

// =============================================================================
// Sub-scores
// =============================================================================

/// Bayesian-smoothed rating on the 0-10 scale.
///
/// `v/(v+m)·R + m/(v+m)·C`. With no votes this is exactly `C`.
pub fn bayesian_rating(vote_average: f64, vote_count: u32) -> f64 {
    let v = vote_count as f64;
    let m = BAYES_PRIOR_VOTES;
    (v / (v + m)) * vote_average + (m / (v + m)) * BAYES_PRIOR_MEAN
}

/// Sum of the user's weights over the movie's recognized genres, capped at 1
pub fn genre_match(weights: &GenreWeights, movie: &Movie) -> f64 {
    movie
        .genres()
        .map(|genre| weights.get(genre))
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// `1 - normalized euclidean distance`; 1.0 for identical vectors
pub fn trait_alignment(user: &TraitVector, movie: &TraitVector) -> f64 {
    1.0 - user.normalized_distance(movie)
}

/// Log-scaled popularity in [0, 1]
pub fn popularity_score(popularity: f64) -> f64 {
    (popularity.max(0.0).ln_1p() / POPULARITY_CEILING.ln_1p()).clamp(0.0, 1.0)
}

/// Penalty for records that would display poorly
pub fn completeness_penalty(movie: &Movie) -> f64 {
    let mut penalty = 0.0;
    if !movie.has_poster() {
        penalty += MISSING_POSTER_PENALTY;
    }
    if !movie.has_overview() {
        penalty += MISSING_OVERVIEW_PENALTY;
    }
    penalty
}

// =============================================================================
// Scorer
// =============================================================================

/// Weights of the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub genre: f64,
    pub alignment: f64,
    pub quality: f64,
    pub popularity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            genre: 0.45,
            alignment: 0.27,
            quality: 0.23,
            popularity: 0.05,
        }
    }
}

/// Every term of a composite score, kept for explanations
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub genre_match: f64,
    pub alignment: f64,
    /// Bayesian rating on the 0-10 scale
    pub bayesian: f64,
    /// `bayesian / 10`, clamped to [0, 1]
    pub quality: f64,
    pub popularity: f64,
    pub penalty: f64,
    pub total: f64,
}

/// A candidate together with its composite score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

impl ScoredCandidate {
    pub fn id(&self) -> MovieId {
        self.candidate.id()
    }

    pub fn movie(&self) -> &Movie {
        &self.candidate.movie
    }
}

/// Computes composite scores.
///
/// Scoring is a pure function of `(weights, profile, movie)`.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn breakdown(&self, profile: &UserProfile, movie: &Movie) -> ScoreBreakdown {
        let genre_match = genre_match(&profile.genre_weights, movie);
        let alignment = trait_alignment(&profile.axes, &movie_traits(movie));
        let bayesian = bayesian_rating(movie.vote_average, movie.vote_count);
        let quality = (bayesian / 10.0).clamp(0.0, 1.0);
        let popularity = popularity_score(movie.popularity);
        let penalty = completeness_penalty(movie);

        let w = &self.weights;
        let total = w.genre * genre_match
            + w.alignment * alignment
            + w.quality * quality
            + w.popularity * popularity
            - penalty;

        ScoreBreakdown {
            genre_match,
            alignment,
            bayesian,
            quality,
            popularity,
            penalty,
            total,
        }
    }

    pub fn score(&self, profile: &UserProfile, movie: &Movie) -> f64 {
        self.breakdown(profile, movie).total
    }

    /// Score a whole pool in parallel
    pub fn score_all(
        &self,
        profile: &UserProfile,
        candidates: &[Candidate],
    ) -> HashMap<MovieId, f64> {
        candidates
            .par_iter()
            .map(|c| (c.id(), self.score(profile, &c.movie)))
            .collect()
    }

    /// Score in parallel, then sort by score descending.
    ///
    /// The sort is stable, so equal scores keep their input order.
    pub fn rank(&self, profile: &UserProfile, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_par_iter()
            .map(|candidate| {
                let score = self.score(profile, &candidate.movie);
                ScoredCandidate { candidate, score }
            })
            .collect();

        sort_by_score(&mut scored);
        scored
    }
}

/// Stable sort, highest score first
pub fn sort_by_score(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;
    use taste_model::{Axis, Genre, archetype};

    fn drama_profile() -> UserProfile {
        let mut weights = GenreWeights::zero();
        weights[Genre::Drama] = 0.8;
        weights[Genre::Romance] = 0.2;
        UserProfile {
            genre_weights: weights,
            axes: archetype(Genre::Drama),
        }
    }

    fn complete_movie(id: MovieId, genres: &[Genre]) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            overview: "Plot".to_string(),
            poster_path: Some("/p.jpg".to_string()),
            vote_average: 7.5,
            vote_count: 2_000,
            popularity: 80.0,
            genre_ids: genres.iter().map(|g| g.catalog_id()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_score_is_deterministic() {
        let scorer = Scorer::new();
        let profile = drama_profile();
        let movie = Movie {
            release_date: Some("1999-03-31".to_string()),
            ..complete_movie(7, &[Genre::Drama, Genre::SciFi])
        };

        let first = scorer.score(&profile, &movie);
        let second = scorer.score(&profile, &movie.clone());
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(scorer.breakdown(&profile, &movie), scorer.breakdown(&profile, &movie));
    }

    #[test]
    fn test_bayesian_without_votes_is_prior() {
        assert_eq!(bayesian_rating(0.0, 0), BAYES_PRIOR_MEAN);
        assert_eq!(bayesian_rating(9.9, 0), BAYES_PRIOR_MEAN);
    }

    #[test]
    fn test_bayesian_shrinks_toward_prior() {
        // Equal weight at v = m
        assert!((bayesian_rating(9.0, 500) - 7.9).abs() < 1e-9);
        // Many votes dominate the prior
        assert!((bayesian_rating(9.0, 1_000_000) - 9.0).abs() < 0.01);
    }

    #[test]
    fn test_genre_match_is_capped() {
        let weights = GenreWeights::new([0.6, 0.6, 0.0, 0.0, 0.0, 0.0]);
        let movie = complete_movie(1, &[Genre::Action, Genre::Comedy]);
        assert_eq!(genre_match(&weights, &movie), 1.0);

        let unknown = Movie {
            genre_ids: vec![27, 99],
            ..Default::default()
        };
        assert_eq!(genre_match(&weights, &unknown), 0.0);
    }

    #[test]
    fn test_alignment_decreases_with_divergence() {
        let base = TraitVector::NEUTRAL;
        assert_eq!(trait_alignment(&base, &base), 1.0);

        let mut near = base;
        near[Axis::Pace] = 0.6;
        let mut far = base;
        far[Axis::Pace] = 0.9;

        let a_near = trait_alignment(&base, &near);
        let a_far = trait_alignment(&base, &far);
        assert!(a_near < 1.0);
        assert!(a_far < a_near);
    }

    #[test]
    fn test_popularity_saturates() {
        assert_eq!(popularity_score(0.0), 0.0);
        assert!((popularity_score(1000.0) - 1.0).abs() < 1e-12);
        assert_eq!(popularity_score(50_000.0), 1.0);
    }

    #[test]
    fn test_penalty_for_incomplete_record() {
        let mut movie = complete_movie(1, &[Genre::Drama]);
        assert_eq!(completeness_penalty(&movie), 0.0);

        movie.poster_path = None;
        movie.overview = "  ".to_string();
        assert!((completeness_penalty(&movie) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn test_breakdown_adds_up() {
        let scorer = Scorer::new();
        let profile = drama_profile();
        let movie = complete_movie(1, &[Genre::Drama]);
        let b = scorer.breakdown(&profile, &movie);

        assert!((b.genre_match - 0.8).abs() < 1e-12);
        assert_eq!(b.alignment, 1.0);
        let expected = 0.45 * b.genre_match + 0.27 * b.alignment + 0.23 * b.quality
            + 0.05 * b.popularity;
        assert!((b.total - expected).abs() < 1e-12);
        assert_eq!(scorer.score(&profile, &movie), b.total);
    }

    #[test]
    fn test_rank_orders_by_fit() {
        let scorer = Scorer::new();
        let profile = drama_profile();
        let candidates = vec![
            Candidate::new(complete_movie(1, &[Genre::Action]), CandidateSource::Discover),
            Candidate::new(complete_movie(2, &[Genre::Drama]), CandidateSource::Discover),
            Candidate::new(complete_movie(3, &[Genre::Drama]), CandidateSource::Similar),
        ];

        let ranked = scorer.rank(&profile, candidates.clone());
        let ids: Vec<MovieId> = ranked.iter().map(ScoredCandidate::id).collect();
        // 2 and 3 tie; input order is kept
        assert_eq!(ids, vec![2, 3, 1]);

        let scores = scorer.score_all(&profile, &candidates);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[&2], ranked[0].score);
    }
}
