//! Genre archetypes on the trait axes.
//!
//! Each genre has a fixed, hand-tuned position on the six axes. A movie's
//! trait vector is the average of the archetypes of the genres it carries.

use crate::types::{Axis, Genre, Movie, TraitVector};

/// Archetype table, values in [`Axis::ALL`] order:
/// light, pace, escape, emotion, complexity, relationship
pub fn archetype(genre: Genre) -> TraitVector {
    match genre {
        Genre::Drama => TraitVector::new([0.20, 0.35, 0.20, 0.85, 0.55, 0.75]),
        Genre::Romance => TraitVector::new([0.45, 0.40, 0.25, 0.80, 0.45, 0.95]),
        Genre::Action => TraitVector::new([0.55, 0.88, 0.45, 0.30, 0.35, 0.35]),
        Genre::SciFi => TraitVector::new([0.45, 0.62, 0.96, 0.45, 0.80, 0.45]),
        Genre::Fantasy => TraitVector::new([0.55, 0.60, 0.92, 0.55, 0.60, 0.55]),
        Genre::Comedy => TraitVector::new([0.95, 0.60, 0.35, 0.35, 0.30, 0.45]),
    }
}

/// Average archetype over the movie's recognized genres.
///
/// Falls back to [`TraitVector::NEUTRAL`] when none of the movie's genres
/// are modelled.
pub fn movie_traits(movie: &Movie) -> TraitVector {
    average_archetype(movie.genres())
}

/// Average archetype of a genre list (duplicates count once per occurrence)
pub fn average_archetype(genres: impl IntoIterator<Item = Genre>) -> TraitVector {
    let mut totals = [0.0; Axis::COUNT];
    let mut count = 0usize;

    for genre in genres {
        let traits = archetype(genre);
        for axis in Axis::ALL {
            totals[axis.index()] += traits.get(axis);
        }
        count += 1;
    }

    if count == 0 {
        return TraitVector::NEUTRAL;
    }
    TraitVector::new(totals.map(|total| total / count as f64))
}
