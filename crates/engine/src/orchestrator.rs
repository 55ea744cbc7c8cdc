//! # Recommendation Orchestrator
//!
//! This module coordinates the entire recommendation pipeline:
//! 1. Collect candidates from genre discovery (fatal on failure)
//! 2. Apply the quality filter
//! 3. Score the filtered pool and pick seeds
//! 4. Expand seeds through the movie graph (failures skipped)
//! 5. Merge base + expansion and re-apply the quality filter
//! 6. Re-score, keep the best slice, select a diverse top-k with MMR
//! 7. Attach score breakdowns and reasons
//!
//! ## Concurrency
//! - Relation calls of one seed run concurrently (see [`GraphSource`])
//! - CPU-bound ranking runs on the blocking pool via `spawn_blocking`,
//!   scoring itself is parallelized with rayon

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use catalog_client::Catalog;
use pipeline::filters::VoteFloorFilter;
use pipeline::{FilterPipeline, ScoreBreakdown, ScoredCandidate, Scorer, build_reason, mmr_select};
use serde::Serialize;
use sources::{
    Candidate, CandidatePool, DiscoverSource, GraphSource, describe_profile, top_genre_label,
};
use taste_model::{Movie, UserProfile};
use tracing::{debug, info, instrument};

use crate::config::RecommendConfig;
use crate::error::Result;

/// One recommended movie
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub candidate: Candidate,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub reason: String,
}

impl Recommendation {
    pub fn movie(&self) -> &Movie {
        &self.candidate.movie
    }
}

/// Candidate counts at each stage of one request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub collected: usize,
    pub filtered: usize,
    pub seeds: usize,
    pub expanded: usize,
    pub merged: usize,
    pub ranked: usize,
}

/// Result of one recommendation request.
///
/// An empty `items` list is a valid outcome (nothing survived), not an error.
#[derive(Debug, Clone)]
pub struct Recommendations {
    /// The (working) profile the list was ranked for
    pub profile: UserProfile,
    pub items: Vec<Recommendation>,
    pub top_genre_label: String,
    pub breakdown_text: String,
    pub stats: PipelineStats,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, movie_id: taste_model::MovieId) -> Option<&Recommendation> {
        self.items.iter().find(|item| item.candidate.id() == movie_id)
    }
}

/// Main orchestrator that coordinates the recommendation pipeline
pub struct RecommendationOrchestrator<C> {
    discover: DiscoverSource<C>,
    graph: GraphSource<C>,
    filter_pipeline: Arc<FilterPipeline>,
    scorer: Scorer,
    config: RecommendConfig,
}

impl<C: Catalog + 'static> RecommendationOrchestrator<C> {
    /// Create a new orchestrator with all components initialized from `config`
    pub fn new(catalog: Arc<C>, config: RecommendConfig) -> Result<Self> {
        config.validate()?;

        let discover = DiscoverSource::new(Arc::clone(&catalog))
            .with_per_call(config.per_call)
            .with_language(config.language.clone())
            .with_page(config.page);
        let graph = GraphSource::new(Arc::clone(&catalog))
            .with_per_seed(config.per_seed)
            .with_language(config.language.clone())
            .with_page(config.page);
        let filter_pipeline = Arc::new(
            FilterPipeline::new().add_filter(
                VoteFloorFilter::new()
                    .with_thresholds(config.vote_thresholds.clone())
                    .with_min_pool(config.min_pool),
            ),
        );
        let scorer = Scorer::new().with_weights(config.weights);

        Ok(Self {
            discover,
            graph,
            filter_pipeline,
            scorer,
            config,
        })
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Main entry point: recommendations for a profile
    ///
    /// # Errors
    /// Fails only when primary discovery fails or a filter errors. Expansion
    /// failures are logged and skipped.
    #[instrument(skip(self, profile))]
    pub async fn recommend(&self, profile: &UserProfile) -> Result<Recommendations> {
        let start_time = Instant::now();
        let mut stats = PipelineStats::default();

        // Collect
        let collected = self.discover.collect(profile).await?;
        stats.collected = collected.len();

        // Filter
        let base = self.apply_filters(collected.into_vec(), profile)?;
        stats.filtered = base.len();
        info!(
            "Quality filter kept {} of {} collected candidates",
            stats.filtered, stats.collected
        );

        // Seeds
        let seeds = self.select_seeds(profile, base.clone()).await?;
        stats.seeds = seeds.len();

        // Expand
        let expanded = self.graph.expand(&seeds).await;
        stats.expanded = expanded.len();

        // Merge + re-filter
        let merged = self.merge_candidates(base, expanded);
        let merged = self.apply_filters(merged, profile)?;
        stats.merged = merged.len();

        // Rank + diversify
        let mut ranked = self.rank(profile, merged).await?;
        ranked.truncate(self.config.mmr_pool);
        stats.ranked = ranked.len();

        let picks = mmr_select(ranked, self.config.final_k, self.config.mmr_lambda);
        let items = self.explain(profile, picks);

        info!(
            "Selected {} recommendations in {:.2?} (collected={}, expanded={}, merged={})",
            items.len(),
            start_time.elapsed(),
            stats.collected,
            stats.expanded,
            stats.merged
        );

        Ok(Recommendations {
            profile: *profile,
            items,
            top_genre_label: top_genre_label(profile),
            breakdown_text: describe_profile(profile),
            stats,
        })
    }

    /// Apply the filter pipeline to candidates
    fn apply_filters(
        &self,
        candidates: Vec<Candidate>,
        profile: &UserProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered = self
            .filter_pipeline
            .apply(candidates, profile)
            .context("Failed to apply filters")?;
        Ok(filtered)
    }

    /// Score on the blocking pool and sort, best first
    async fn rank(
        &self,
        profile: &UserProfile,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<ScoredCandidate>> {
        let scorer = self.scorer.clone();
        let profile = *profile;
        let ranked = tokio::task::spawn_blocking(move || scorer.rank(&profile, candidates))
            .await
            .context("Ranking task panicked")?;
        Ok(ranked)
    }

    /// The best `seed_count` movies of the filtered base pool
    async fn select_seeds(
        &self,
        profile: &UserProfile,
        base: Vec<Candidate>,
    ) -> Result<Vec<Movie>> {
        let mut ranked = self.rank(profile, base).await?;
        ranked.truncate(self.config.seed_count);

        let seeds: Vec<Movie> = ranked.into_iter().map(|s| s.candidate.movie).collect();
        debug!(
            "Seeds: {:?}",
            seeds.iter().map(|m| m.id).collect::<Vec<_>>()
        );
        Ok(seeds)
    }

    /// Merge base and expansion by id.
    ///
    /// Base candidates are inserted first; an expansion record with the same
    /// id replaces the base record in place.
    fn merge_candidates(&self, base: Vec<Candidate>, expanded: CandidatePool) -> Vec<Candidate> {
        let base_len = base.len();
        let expanded_len = expanded.len();

        let mut pool: CandidatePool = base.into_iter().collect();
        pool.extend(expanded);

        info!(
            "Merged candidates: base={}, expanded={}, total_after_dedup={}",
            base_len,
            expanded_len,
            pool.len()
        );
        pool.into_vec()
    }

    /// Attach breakdowns and reasons to the final picks
    fn explain(&self, profile: &UserProfile, picks: Vec<ScoredCandidate>) -> Vec<Recommendation> {
        picks
            .into_iter()
            .map(|pick| {
                let breakdown = self.scorer.breakdown(profile, &pick.candidate.movie);
                let reason = build_reason(profile, &pick.candidate.movie);
                Recommendation {
                    candidate: pick.candidate,
                    score: pick.score,
                    breakdown,
                    reason,
                }
            })
            .collect()
    }
}
