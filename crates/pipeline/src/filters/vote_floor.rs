//! Progressive quality filter on vote counts.
//!
//! Drops thinly-voted movies, but relaxes itself when that would leave too
//! little to rank.

use crate::traits::Filter;
use anyhow::Result;
use sources::Candidate;
use taste_model::UserProfile;
use tracing::debug;

/// Vote-count floors tried in order, strictest first
pub const DEFAULT_VOTE_THRESHOLDS: [u32; 4] = [300, 150, 50, 0];

/// Smallest pool a floor must leave to be accepted
pub const DEFAULT_MIN_POOL: usize = 25;

/// Keeps candidates with at least `threshold` votes, for the strictest
/// threshold that still leaves `min_pool` candidates.
///
/// ## Algorithm
/// 1. For each threshold, strictest first, keep `vote_count >= threshold`
/// 2. Accept the first result holding at least `min_pool` candidates
/// 3. If none does, return the input unfiltered
///
/// A non-empty input therefore always gives a non-empty output.
pub struct VoteFloorFilter {
    thresholds: Vec<u32>,
    min_pool: usize,
}

impl VoteFloorFilter {
    pub fn new() -> Self {
        Self {
            thresholds: DEFAULT_VOTE_THRESHOLDS.to_vec(),
            min_pool: DEFAULT_MIN_POOL,
        }
    }

    /// Configure the thresholds (tried in the given order)
    pub fn with_thresholds(mut self, thresholds: Vec<u32>) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Configure the minimum accepted pool size (default: 25)
    pub fn with_min_pool(mut self, min_pool: usize) -> Self {
        self.min_pool = min_pool;
        self
    }

    /// The threshold that would be applied to `candidates`, `None` if the
    /// input would be returned unfiltered
    pub fn select_threshold(&self, candidates: &[Candidate]) -> Option<u32> {
        self.thresholds.iter().copied().find(|&threshold| {
            let kept = candidates
                .iter()
                .filter(|c| c.movie.vote_count >= threshold)
                .count();
            kept >= self.min_pool
        })
    }
}

impl Default for VoteFloorFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for VoteFloorFilter {
    fn name(&self) -> &str {
        "VoteFloorFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _profile: &UserProfile) -> Result<Vec<Candidate>> {
        let Some(threshold) = self.select_threshold(&candidates) else {
            debug!(
                "No vote floor keeps {} candidates, keeping all {}",
                self.min_pool,
                candidates.len()
            );
            return Ok(candidates);
        };

        debug!("Applying vote floor {}", threshold);
        Ok(candidates
            .into_iter()
            .filter(|c| c.movie.vote_count >= threshold)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;
    use taste_model::{GenreWeights, Movie, TraitVector};

    fn candidates(vote_counts: &[u32]) -> Vec<Candidate> {
        vote_counts
            .iter()
            .enumerate()
            .map(|(i, &vote_count)| {
                Candidate::new(
                    Movie {
                        id: i as u64 + 1,
                        vote_count,
                        ..Default::default()
                    },
                    CandidateSource::Discover,
                )
            })
            .collect()
    }

    fn profile() -> UserProfile {
        UserProfile {
            genre_weights: GenreWeights::uniform(),
            axes: TraitVector::NEUTRAL,
        }
    }

    #[test]
    fn test_strictest_sufficient_threshold_wins() {
        // 30 movies at 400 votes, 10 at 100
        let mut counts = vec![400; 30];
        counts.extend(vec![100; 10]);
        let filtered = VoteFloorFilter::new()
            .apply(candidates(&counts), &profile())
            .unwrap();

        assert_eq!(filtered.len(), 30);
        assert!(filtered.iter().all(|c| c.movie.vote_count >= 300));
    }

    #[test]
    fn test_relaxes_to_lower_threshold() {
        // 10 at 400, 20 at 60, 5 at 0
        let mut counts = vec![400; 10];
        counts.extend(vec![60; 20]);
        counts.extend(vec![0; 5]);

        let filter = VoteFloorFilter::new();
        let input = candidates(&counts);
        assert_eq!(filter.select_threshold(&input), Some(50));

        let filtered = filter.apply(input, &profile()).unwrap();
        assert_eq!(filtered.len(), 30);
    }

    #[test]
    fn test_small_pool_is_kept_whole() {
        let filtered = VoteFloorFilter::new()
            .apply(candidates(&[0, 5, 1000]), &profile())
            .unwrap();
        assert_eq!(filtered.len(), 3);

        // Order is preserved
        let ids: Vec<u64> = filtered.iter().map(Candidate::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_input() {
        let filtered = VoteFloorFilter::new().apply(Vec::new(), &profile()).unwrap();
        assert!(filtered.is_empty());
    }
}
