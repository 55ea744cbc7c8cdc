//! Like/dislike feedback and how it bends a profile.
//!
//! Feedback is kept apart from the base profile as a bounded accumulator.
//! A working profile is always recomputed from `base + feedback`, so the
//! base never drifts and a reset is just zeroing the accumulator.

use serde::{Deserialize, Serialize};
use taste_model::{Axis, Genre, Movie, TraitVector, UserProfile, movie_traits};

/// Genre adjustment per like (+) or dislike (-)
pub const GENRE_STEP: f64 = 0.08;
/// Bound on the accumulated adjustment of any genre
pub const GENRE_ADJ_LIMIT: f64 = 0.25;
/// Scale applied to `(movie_axis - 0.5)` per like/dislike
pub const AXIS_STEP: f64 = 0.05;
/// Bound on the accumulated adjustment of any axis
pub const AXIS_ADJ_LIMIT: f64 = 0.20;

/// Accumulated feedback for one session
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackState {
    genre_adj: [f64; Genre::COUNT],
    axis_adj: [f64; Axis::COUNT],
}

impl FeedbackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genre_adj(&self, genre: Genre) -> f64 {
        self.genre_adj[genre.index()]
    }

    pub fn axis_adj(&self, axis: Axis) -> f64 {
        self.axis_adj[axis.index()]
    }

    pub fn is_zero(&self) -> bool {
        self.genre_adj.iter().chain(self.axis_adj.iter()).all(|v| *v == 0.0)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record a like (`liked = true`) or dislike for a movie.
    ///
    /// Every recognized genre on the movie moves by one step; every axis moves
    /// toward (like) or away from (dislike) the movie's trait vector, scaled by
    /// how far that axis sits from neutral. Both are clamped after each step,
    /// which makes the result depend on the order of calls.
    pub fn record(&mut self, movie: &Movie, liked: bool) {
        let sign = if liked { 1.0 } else { -1.0 };

        for genre in movie.genres() {
            let slot = &mut self.genre_adj[genre.index()];
            *slot = (*slot + sign * GENRE_STEP).clamp(-GENRE_ADJ_LIMIT, GENRE_ADJ_LIMIT);
        }

        let traits = movie_traits(movie);
        for (axis, value) in traits.iter() {
            let slot = &mut self.axis_adj[axis.index()];
            *slot = (*slot + (value - 0.5) * AXIS_STEP * sign)
                .clamp(-AXIS_ADJ_LIMIT, AXIS_ADJ_LIMIT);
        }
    }
}

/// Apply feedback to a copy of `base`.
///
/// Genre weights are shifted, floored at zero and renormalized; if nothing
/// positive is left the base distribution is kept unchanged. Axes are shifted
/// and clamped into [0, 1]. Neither input is modified.
pub fn apply_feedback(base: &UserProfile, feedback: &FeedbackState) -> UserProfile {
    let mut weights = base.genre_weights;
    for genre in Genre::ALL {
        weights[genre] = (weights[genre] + feedback.genre_adj(genre)).max(0.0);
    }
    let genre_weights = weights.normalized().unwrap_or(base.genre_weights);

    let mut axes: TraitVector = base.axes;
    for axis in Axis::ALL {
        axes[axis] += feedback.axis_adj(axis);
    }

    UserProfile {
        genre_weights,
        axes: axes.clamped(),
    }
}
