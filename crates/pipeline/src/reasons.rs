//! Human-readable "why this movie" lines.
//!
//! Compares the user's axes with the movie's trait vector and mentions the
//! axes where both sit clearly high (or, for pace and lightness, clearly low).
//! Reasons are display-only and never feed back into ranking.

use taste_model::{Axis, Movie, UserProfile, movie_traits};

use crate::scoring::bayesian_rating;

/// Both sides at or above this count as a "high" match
pub const HIGH_MATCH: f64 = 0.62;
/// User at or below this (and movie at or below [`LOW_MATCH_MOVIE`]) is a "low" match
pub const LOW_MATCH_USER: f64 = 0.40;
pub const LOW_MATCH_MOVIE: f64 = 0.45;

/// Axis messages kept per reason
pub const MAX_AXIS_REASONS: usize = 2;

pub const SEPARATOR: &str = " · ";

const FALLBACK: &str = "fits the pattern of your choices";

struct AxisRule {
    axis: Axis,
    high: &'static str,
    low: Option<&'static str>,
}

// Checked in this order; the first matches win
const RULES: [AxisRule; 6] = [
    AxisRule {
        axis: Axis::Escape,
        high: "a strong pull into another world",
        low: None,
    },
    AxisRule {
        axis: Axis::Pace,
        high: "fast, punchy pacing",
        low: Some("a slow build that suits you"),
    },
    AxisRule {
        axis: Axis::Light,
        high: "an easy, light-hearted tone",
        low: Some("a weighty tone that lingers"),
    },
    AxisRule {
        axis: Axis::Emotion,
        high: "an emotional arc that stays with you",
        low: None,
    },
    AxisRule {
        axis: Axis::Complexity,
        high: "a world and structure worth digging into",
        low: None,
    },
    AxisRule {
        axis: Axis::Relationship,
        high: "relationships and chemistry at its core",
        low: None,
    },
];

/// Build the reason line for one recommended movie.
///
/// At most [`MAX_AXIS_REASONS`] axis messages, or a generic fallback, followed
/// by the movie's adjusted rating, joined with `" · "`.
pub fn build_reason(profile: &UserProfile, movie: &Movie) -> String {
    let traits = movie_traits(movie);

    let mut parts: Vec<String> = RULES
        .iter()
        .filter_map(|rule| {
            let user = profile.axes.get(rule.axis);
            let film = traits.get(rule.axis);
            if user >= HIGH_MATCH && film >= HIGH_MATCH {
                Some(rule.high)
            } else if user <= LOW_MATCH_USER && film <= LOW_MATCH_MOVIE {
                rule.low
            } else {
                None
            }
        })
        .take(MAX_AXIS_REASONS)
        .map(str::to_string)
        .collect();

    if parts.is_empty() {
        parts.push(FALLBACK.to_string());
    }

    let bayes = bayesian_rating(movie.vote_average, movie.vote_count);
    parts.push(format!("holds up on adjusted rating (adjusted {bayes:.1})"));

    parts.join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taste_model::{Genre, GenreWeights, TraitVector};

    fn profile(axes: TraitVector) -> UserProfile {
        UserProfile {
            genre_weights: GenreWeights::uniform(),
            axes,
        }
    }

    fn movie(genres: &[Genre]) -> Movie {
        Movie {
            id: 1,
            vote_average: 8.0,
            vote_count: 500,
            genre_ids: genres.iter().map(|g| g.catalog_id()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_neutral_profile_uses_fallback() {
        let reason = build_reason(&profile(TraitVector::NEUTRAL), &movie(&[Genre::Drama]));
        assert_eq!(
            reason,
            "fits the pattern of your choices · holds up on adjusted rating (adjusted 7.4)"
        );
    }

    #[test]
    fn test_high_matches_in_priority_order() {
        // sf archetype: escape 0.96, pace 0.62, complexity 0.80
        let axes = TraitVector::new([0.5, 0.7, 0.9, 0.5, 0.9, 0.5]);
        let reason = build_reason(&profile(axes), &movie(&[Genre::SciFi]));

        let parts: Vec<&str> = reason.split(SEPARATOR).collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "a strong pull into another world");
        assert_eq!(parts[1], "fast, punchy pacing");
        assert!(parts[2].starts_with("holds up on adjusted rating"));
    }

    #[test]
    fn test_low_match_only_for_pace_and_light() {
        // drama archetype: light 0.20, pace 0.35, escape 0.20
        let axes = TraitVector::new([0.3, 0.3, 0.3, 0.5, 0.5, 0.5]);
        let reason = build_reason(&profile(axes), &movie(&[Genre::Drama]));

        assert!(reason.starts_with("a slow build that suits you · a weighty tone that lingers"));
    }

    #[test]
    fn test_unrated_movie_shows_prior() {
        let mut m = movie(&[Genre::Comedy]);
        m.vote_count = 0;
        let reason = build_reason(&profile(TraitVector::NEUTRAL), &m);
        assert!(reason.ends_with("(adjusted 6.8)"));
    }
}
