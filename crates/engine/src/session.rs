//! One user's interaction state.
//!
//! A session holds the base profile from the last completed quiz, the
//! feedback accumulated since, and the most recent recommendation list.
//!
//! ## State transitions
//! - `submit_quiz`: new base profile, feedback reset, old list dropped
//! - `record_feedback`: bumps the accumulator, base untouched
//! - `reset_feedback`: back to the plain quiz profile
//! - `refresh`: re-run the pipeline for `base + feedback`

use catalog_client::Catalog;
use sources::{FeedbackState, apply_feedback, build_profile};
use taste_model::{Movie, MovieId, UserProfile};
use tracing::{debug, info};

use crate::error::{RecommendError, Result};
use crate::orchestrator::{RecommendationOrchestrator, Recommendations};

pub struct Session<C> {
    orchestrator: RecommendationOrchestrator<C>,
    base_profile: Option<UserProfile>,
    feedback: FeedbackState,
    last_recommendations: Option<Recommendations>,
}

impl<C: Catalog + 'static> Session<C> {
    pub fn new(orchestrator: RecommendationOrchestrator<C>) -> Self {
        Self {
            orchestrator,
            base_profile: None,
            feedback: FeedbackState::new(),
            last_recommendations: None,
        }
    }

    pub fn orchestrator(&self) -> &RecommendationOrchestrator<C> {
        &self.orchestrator
    }

    pub fn base_profile(&self) -> Option<&UserProfile> {
        self.base_profile.as_ref()
    }

    pub fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    pub fn last_recommendations(&self) -> Option<&Recommendations> {
        self.last_recommendations.as_ref()
    }

    /// Build a new base profile from quiz answers.
    ///
    /// On success feedback is reset and the previous list is dropped. On
    /// error the session is left exactly as it was.
    pub fn submit_quiz(&mut self, answers: &[usize]) -> Result<&UserProfile> {
        let profile = build_profile(answers)?;

        self.feedback.reset();
        self.last_recommendations = None;
        info!(
            "New base profile, top genre {:?}",
            profile.top_genre().map(|g| g.key())
        );
        Ok(self.base_profile.insert(profile))
    }

    /// The base profile with the current feedback applied
    pub fn working_profile(&self) -> Result<UserProfile> {
        let base = self.base_profile.as_ref().ok_or(RecommendError::NoProfile)?;
        Ok(apply_feedback(base, &self.feedback))
    }

    /// Record a like or dislike. Takes effect on the next refresh.
    pub fn record_feedback(&mut self, movie: &Movie, liked: bool) -> Result<()> {
        if self.base_profile.is_none() {
            return Err(RecommendError::NoProfile);
        }
        self.feedback.record(movie, liked);
        debug!(movie_id = movie.id, liked, "Recorded feedback");
        Ok(())
    }

    /// Record feedback for a movie of the last list, by id.
    ///
    /// Returns `Ok(false)` when the id is not in the last list.
    pub fn record_feedback_for(&mut self, movie_id: MovieId, liked: bool) -> Result<bool> {
        let movie = self
            .last_recommendations
            .as_ref()
            .and_then(|recs| recs.find(movie_id))
            .map(|item| item.candidate.movie.clone());

        match movie {
            Some(movie) => {
                self.record_feedback(&movie, liked)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn reset_feedback(&mut self) {
        self.feedback.reset();
    }

    /// Re-run the pipeline with the working profile
    pub async fn refresh(&mut self) -> Result<&Recommendations> {
        let profile = self.working_profile()?;
        let recommendations = self.orchestrator.recommend(&profile).await?;
        Ok(self.last_recommendations.insert(recommendations))
    }
}
