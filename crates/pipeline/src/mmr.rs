//! Diversity-aware selection with Maximal Marginal Relevance.
//!
//! Picks `k` items that score well but do not all look alike. Two movies look
//! alike when they share genres and were released close together.

use std::collections::HashSet;

use taste_model::Movie;

use crate::scoring::{ScoredCandidate, sort_by_score};

/// Default trade-off between relevance (1.0) and diversity (0.0)
pub const DEFAULT_LAMBDA: f64 = 0.78;

const GENRE_SIMILARITY_WEIGHT: f64 = 0.75;
const YEAR_SIMILARITY_WEIGHT: f64 = 0.25;

/// Years apart at which release years stop counting as similar
const YEAR_WINDOW: f64 = 10.0;

/// Jaccard index of the two movies' catalog genre ids; 0 if both have none
pub fn genre_jaccard(a: &Movie, b: &Movie) -> f64 {
    let ga: HashSet<_> = a.genre_ids.iter().copied().collect();
    let gb: HashSet<_> = b.genre_ids.iter().copied().collect();

    let union = ga.union(&gb).count();
    if union == 0 {
        return 0.0;
    }
    ga.intersection(&gb).count() as f64 / union as f64
}

/// `1 - |Δyear| / 10` clamped to [0, 1]; 0 when either year is unknown
pub fn year_closeness(a: &Movie, b: &Movie) -> f64 {
    match (a.year(), b.year()) {
        (Some(ya), Some(yb)) => {
            let delta = (ya - yb).abs() as f64;
            (1.0 - delta / YEAR_WINDOW).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// Similarity in [0, 1] between two movies
pub fn similarity(a: &Movie, b: &Movie) -> f64 {
    GENRE_SIMILARITY_WEIGHT * genre_jaccard(a, b) + YEAR_SIMILARITY_WEIGHT * year_closeness(a, b)
}

/// Select up to `k` candidates by MMR.
///
/// ## Algorithm
/// 1. Drop repeated ids (first occurrence wins), sort by score descending
/// 2. Select the top-scored candidate
/// 3. Repeatedly select the remaining candidate maximizing
///    `λ·score − (1−λ)·max similarity to anything already selected`
/// 4. Stop after `k` picks or when nothing remains
///
/// Ties go to the candidate that ranks higher by score.
pub fn mmr_select(candidates: Vec<ScoredCandidate>, k: usize, lambda: f64) -> Vec<ScoredCandidate> {
    let mut seen = HashSet::new();
    let mut remaining: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.id()))
        .collect();
    sort_by_score(&mut remaining);

    let mut selected: Vec<ScoredCandidate> = Vec::with_capacity(k.min(remaining.len()));
    if k == 0 || remaining.is_empty() {
        return selected;
    }
    selected.push(remaining.remove(0));

    while selected.len() < k && !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_mmr = f64::NEG_INFINITY;

        for (idx, candidate) in remaining.iter().enumerate() {
            let max_sim = selected
                .iter()
                .map(|s| similarity(candidate.movie(), s.movie()))
                .fold(0.0, f64::max);
            let mmr = lambda * candidate.score - (1.0 - lambda) * max_sim;
            if mmr > best_mmr {
                best_mmr = mmr;
                best_idx = idx;
            }
        }

        selected.push(remaining.remove(best_idx));
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::{Candidate, CandidateSource};
    use taste_model::{Genre, MovieId};

    fn movie(id: MovieId, genres: &[Genre], date: &str) -> Movie {
        Movie {
            id,
            release_date: Some(date.to_string()),
            genre_ids: genres.iter().map(|g| g.catalog_id()).collect(),
            ..Default::default()
        }
    }

    fn scored(movie: Movie, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            candidate: Candidate::new(movie, CandidateSource::Discover),
            score,
        }
    }

    #[test]
    fn test_self_similarity_is_one() {
        let m = movie(1, &[Genre::Drama, Genre::Romance], "2004-06-25");
        assert!((similarity(&m, &m) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_components() {
        let a = movie(1, &[Genre::Action, Genre::SciFi], "1999-03-31");
        let b = movie(2, &[Genre::Action], "2004-01-01");
        assert!((genre_jaccard(&a, &b) - 0.5).abs() < 1e-12);
        assert!((year_closeness(&a, &b) - 0.5).abs() < 1e-12);

        let undated = Movie {
            id: 3,
            ..Default::default()
        };
        assert_eq!(year_closeness(&a, &undated), 0.0);
        assert_eq!(genre_jaccard(&undated, &undated), 0.0);
    }

    #[test]
    fn test_size_first_and_uniqueness() {
        let pool = vec![
            scored(movie(1, &[Genre::Drama], "2000-01-01"), 0.5),
            scored(movie(2, &[Genre::Drama], "2000-01-01"), 0.9),
            scored(movie(3, &[Genre::Comedy], "1980-01-01"), 0.7),
            scored(movie(2, &[Genre::Drama], "2000-01-01"), 0.9),
        ];

        let picked = mmr_select(pool.clone(), 5, DEFAULT_LAMBDA);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0].id(), 2);
        let ids: HashSet<MovieId> = picked.iter().map(ScoredCandidate::id).collect();
        assert_eq!(ids.len(), 3);

        assert_eq!(mmr_select(pool.clone(), 2, DEFAULT_LAMBDA).len(), 2);
        assert!(mmr_select(pool, 0, DEFAULT_LAMBDA).is_empty());
        assert!(mmr_select(Vec::new(), 5, DEFAULT_LAMBDA).is_empty());
    }

    #[test]
    fn test_diversity_beats_small_score_gap() {
        // 2 is a near-clone of 1; 3 scores a bit lower but is different
        let pool = vec![
            scored(movie(1, &[Genre::Action], "2010-01-01"), 0.80),
            scored(movie(2, &[Genre::Action], "2010-06-01"), 0.79),
            scored(movie(3, &[Genre::Romance], "1995-01-01"), 0.70),
        ];

        let picked = mmr_select(pool, 2, DEFAULT_LAMBDA);
        let ids: Vec<MovieId> = picked.iter().map(ScoredCandidate::id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_pure_relevance_follows_score() {
        let pool = vec![
            scored(movie(1, &[Genre::Action], "2010-01-01"), 0.80),
            scored(movie(2, &[Genre::Action], "2010-06-01"), 0.79),
            scored(movie(3, &[Genre::Romance], "1995-01-01"), 0.70),
        ];

        let picked = mmr_select(pool, 3, 1.0);
        let ids: Vec<MovieId> = picked.iter().map(ScoredCandidate::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
