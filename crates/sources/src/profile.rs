//! Build a taste profile from quiz answers
//!
//! This module turns an answer sheet into a [`UserProfile`]:
//! - one genre vote per answered question
//! - axis deltas accumulated from a neutral 0.5 start
//!
//! The result carries everything ranking needs, so nothing downstream reads
//! the quiz tables again.

use taste_model::{
    Axis, GENRE_PRIORITY, Genre, GenreWeights, OPTION_COUNT, QUESTIONS, QuizError, TraitVector,
    UserProfile,
};

/// Build a profile from one option index per question, in question order.
///
/// ## Errors
/// - [`QuizError::Incomplete`] if the number of answers differs from the
///   number of questions
/// - [`QuizError::OutOfRange`] naming the first question whose answer is not
///   a valid option index
pub fn build_profile(answers: &[usize]) -> Result<UserProfile, QuizError> {
    if answers.len() != QUESTIONS.len() {
        return Err(QuizError::Incomplete {
            expected: QUESTIONS.len(),
            found: answers.len(),
        });
    }

    let mut votes = GenreWeights::zero();
    let mut axes = TraitVector::NEUTRAL;

    for (position, (question, &answer)) in QUESTIONS.iter().zip(answers).enumerate() {
        let (genre, delta) = question.option(answer).ok_or(QuizError::OutOfRange {
            question: position + 1,
            index: answer,
        })?;

        votes[genre] += 1.0;
        for axis in Axis::ALL {
            axes[axis] += delta[axis.index()];
        }
    }

    Ok(UserProfile {
        genre_weights: votes.normalized().unwrap_or_else(GenreWeights::uniform),
        axes: axes.clamped(),
    })
}

/// Headline for a profile, e.g. `"Your genre: Drama!"`
pub fn top_genre_label(profile: &UserProfile) -> String {
    let genre = profile.top_genre().unwrap_or(GENRE_PRIORITY[0]);
    format!("Your genre: {}!", genre.label())
}

/// Two-line summary of a profile.
///
/// Genres are listed strongest first with two-decimal weights, followed by
/// every axis in fixed order.
pub fn describe_profile(profile: &UserProfile) -> String {
    let genres = profile
        .genre_weights
        .ranked()
        .into_iter()
        .map(|(genre, weight)| format!("{} {:.2}", genre.label(), weight))
        .collect::<Vec<_>>()
        .join(", ");

    let axes = profile
        .axes
        .iter()
        .map(|(axis, value)| format!("{} {:.2}", axis.label(), value))
        .collect::<Vec<_>>()
        .join(" · ");

    format!("Genre weights: {genres}\nTraits: {axes}")
}

/// The option index voting for `genre` on every question, if each question
/// offers that genre.
///
/// Handy for building single-genre answer sheets (all action, all comedy).
pub fn uniform_answers(genre: Genre) -> Option<Vec<usize>> {
    QUESTIONS
        .iter()
        .map(|question| (0..OPTION_COUNT).find(|&i| question.genres[i] == genre))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_action_answers() {
        let answers = uniform_answers(Genre::Action).unwrap();
        let profile = build_profile(&answers).unwrap();

        assert!((profile.genre_weights[Genre::Action] - 1.0).abs() < 1e-9);
        assert_eq!(profile.top_genres(3), vec![Genre::Action]);
        assert!(profile.axes.get(Axis::Pace) > 0.5);
        assert_eq!(top_genre_label(&profile), "Your genre: Action!");
    }

    #[test]
    fn test_all_a_answers_split_drama_and_romance() {
        let profile = build_profile(&[0; 10]).unwrap();

        // Q3 and Q8 vote romance on option A
        assert!((profile.genre_weights[Genre::Drama] - 0.8).abs() < 1e-9);
        assert!((profile.genre_weights[Genre::Romance] - 0.2).abs() < 1e-9);
        assert!(profile.axes.get(Axis::Emotion) > 0.5);
        assert!(profile.axes.get(Axis::Relationship) > 0.5);
        assert!(profile.axes.get(Axis::Light) < 0.5);
    }

    #[test]
    fn test_weights_and_axes_stay_in_range() {
        for a in 0..OPTION_COUNT {
            for b in 0..OPTION_COUNT {
                let answers: Vec<usize> = (0..10).map(|i| if i % 2 == 0 { a } else { b }).collect();
                let profile = build_profile(&answers).unwrap();

                assert!((profile.genre_weights.sum() - 1.0).abs() < 1e-9);
                for (_, value) in profile.axes.iter() {
                    assert!((0.0..=1.0).contains(&value));
                }
            }
        }
    }

    #[test]
    fn test_incomplete_answers_rejected() {
        assert_eq!(
            build_profile(&[0; 9]).unwrap_err(),
            QuizError::Incomplete {
                expected: 10,
                found: 9
            }
        );
        assert!(build_profile(&[]).is_err());
    }

    #[test]
    fn test_out_of_range_names_question() {
        let mut answers = vec![1; 10];
        answers[3] = 4;
        assert_eq!(
            build_profile(&answers).unwrap_err(),
            QuizError::OutOfRange {
                question: 4,
                index: 4
            }
        );
    }

    #[test]
    fn test_describe_profile() {
        let answers = uniform_answers(Genre::Comedy).unwrap();
        let profile = build_profile(&answers).unwrap();
        let text = describe_profile(&profile);

        assert!(text.starts_with("Genre weights: Comedy 1.00, Action 0.00"));
        assert!(text.contains("Traits: Lightness "));
        assert!(text.contains("Relationships "));
    }

    #[test]
    fn test_describe_profile_sorts_genres_by_weight() {
        let profile = build_profile(&[0; 10]).unwrap();
        let text = describe_profile(&profile);

        assert!(
            text.starts_with("Genre weights: Drama 0.80, Romance 0.20, Action 0.00, Comedy 0.00")
        );

        let weights_line = text.lines().next().unwrap();
        let weights: Vec<f64> = weights_line
            .trim_start_matches("Genre weights: ")
            .split(", ")
            .map(|entry| entry.rsplit(' ').next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(weights.len(), Genre::COUNT);
        assert!(weights.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
