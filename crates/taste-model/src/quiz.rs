//! The personality quiz: questions, options, and what each option votes for.
//!
//! Every question has exactly four options (A-D). Picking an option
//! - adds one vote to a genre, and
//! - nudges the trait axes by a fixed delta.
//!
//! Questions 1-5 share [`DEFAULT_DELTAS`]. Questions 6-10 carry their own
//! tables so specific axes (complexity, relationship, ...) move harder.

use crate::error::{QuizError, Result};
use crate::types::Genre::{Action, Comedy, Drama, Fantasy, Romance, SciFi};
use crate::types::{Axis, Genre};

/// Number of options per question
pub const OPTION_COUNT: usize = 4;

/// Axis deltas in [`Axis::ALL`] order: light, pace, escape, emotion, complexity, relationship
pub type AxisDelta = [f64; Axis::COUNT];

/// A single quiz question
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub prompt: &'static str,
    pub options: [&'static str; OPTION_COUNT],
    /// Genre voted for by each option
    pub genres: [Genre; OPTION_COUNT],
    /// Axis delta applied by each option
    pub deltas: &'static [AxisDelta; OPTION_COUNT],
}

impl Question {
    /// Genre vote and axis delta for an option, `None` if out of range
    pub fn option(&self, index: usize) -> Option<(Genre, &'static AxisDelta)> {
        let genre = *self.genres.get(index)?;
        let deltas: &'static [AxisDelta; OPTION_COUNT] = self.deltas;
        let delta = deltas.get(index)?;
        Some((genre, delta))
    }
}

/// Shared table used by questions 1-5
pub const DEFAULT_DELTAS: [AxisDelta; OPTION_COUNT] = [
    [-0.10, -0.08, -0.06, 0.10, 0.05, 0.10],
    [0.03, 0.18, 0.05, -0.06, -0.03, -0.05],
    [0.02, 0.05, 0.22, 0.02, 0.10, -0.02],
    [0.18, 0.02, 0.02, -0.10, -0.08, -0.02],
];

// Q6: mood (light/emotion move harder)
const MOOD_DELTAS: [AxisDelta; OPTION_COUNT] = [
    [-0.12, -0.06, -0.04, 0.14, 0.04, 0.08],
    [0.04, 0.16, 0.06, -0.06, -0.02, -0.04],
    [0.02, 0.06, 0.24, 0.02, 0.12, -0.02],
    [0.20, 0.02, 0.02, -0.12, -0.08, -0.02],
];

// Q7: storytelling (complexity)
const STORY_DELTAS: [AxisDelta; OPTION_COUNT] = [
    [-0.08, -0.08, -0.04, 0.10, 0.10, 0.06],
    [0.02, 0.20, 0.04, -0.06, -0.05, -0.04],
    [0.02, 0.04, 0.14, 0.00, 0.18, -0.02],
    [0.16, 0.06, 0.02, -0.08, -0.10, -0.02],
];

// Q8: relationships
const RELATIONSHIP_DELTAS: [AxisDelta; OPTION_COUNT] = [
    [-0.06, -0.06, -0.04, 0.12, 0.02, 0.20],
    [0.04, 0.16, 0.06, -0.06, -0.02, -0.02],
    [0.02, 0.06, 0.18, 0.04, 0.06, 0.04],
    [0.18, 0.04, 0.02, -0.10, -0.08, -0.02],
];

// Q9: favourite scenes (pace/escape/complexity)
const SCENE_DELTAS: [AxisDelta; OPTION_COUNT] = [
    [-0.08, -0.04, -0.02, 0.08, 0.08, 0.08],
    [0.04, 0.20, 0.06, -0.06, -0.02, -0.04],
    [0.04, 0.06, 0.24, 0.02, 0.10, -0.02],
    [0.18, 0.04, 0.02, -0.10, -0.08, -0.02],
];

// Q10: aftertaste (emotion/escape)
const AFTERTASTE_DELTAS: [AxisDelta; OPTION_COUNT] = [
    [-0.10, -0.06, -0.04, 0.14, 0.04, 0.10],
    [0.06, 0.18, 0.06, -0.06, -0.03, -0.04],
    [0.02, 0.04, 0.26, 0.02, 0.12, -0.02],
    [0.18, 0.02, 0.02, -0.10, -0.08, -0.02],
];

/// The full quiz, in presentation order
pub const QUESTIONS: [Question; 10] = [
    Question {
        prompt: "Q1. On a completely draining day, how do you reset?",
        options: [
            "A. Talk quietly with someone until my head clears",
            "B. Move my body or do something thrilling to shake off the stress",
            "C. Slip out of reality for a while and visit another world",
            "D. Watch something funny and laugh it all off",
        ],
        genres: [Drama, Action, Fantasy, Comedy],
        deltas: &DEFAULT_DELTAS,
    },
    Question {
        prompt: "Q2. Which kind of protagonist pulls you in?",
        options: [
            "A. Someone with scars and a past who grows in the end",
            "B. Actions over words: the one who just solves the crisis",
            "C. Someone who sees truths others miss, or a one-of-a-kind being",
            "D. A lovable klutz you can't help rooting for",
        ],
        genres: [Drama, Action, SciFi, Comedy],
        deltas: &DEFAULT_DELTAS,
    },
    Question {
        prompt: "Q3. You're going on a trip. What's the plan?",
        options: [
            "A. Atmospheric streets, pretty cafés, and moody photos",
            "B. Full activity course: surfing, hiking, ziplining",
            "C. Jaw-dropping landscapes or mysterious ruins to recharge my imagination",
            "D. Barely any plan, just enjoy whatever fun turns up",
        ],
        genres: [Romance, Action, Fantasy, Comedy],
        deltas: &DEFAULT_DELTAS,
    },
    Question {
        prompt: "Q4. A big problem suddenly blows up. How do you react?",
        options: [
            "A. \"Why did this happen...\" I sort out my feelings first, then move",
            "B. Fix it first! I act immediately and hit it head-on",
            "C. I analyse the causes and structure; there must be a hidden rule",
            "D. I crack a joke first and lift the mood",
        ],
        genres: [Drama, Action, SciFi, Comedy],
        deltas: &DEFAULT_DELTAS,
    },
    Question {
        prompt: "Q5. What kind of ending do you love most?",
        options: [
            "A. A full-hearted ending that lingers for a long time",
            "B. \"That was insane...\" one huge, satisfying blow-out",
            "C. Twists, reveals, loose threads: an ending that sets me imagining",
            "D. Feel-good right to the end, smiling without noticing",
        ],
        genres: [Drama, Action, SciFi, Comedy],
        deltas: &DEFAULT_DELTAS,
    },
    Question {
        prompt: "Q6. What mood do you want to watch today?",
        options: [
            "A. A quiet story that gently touches the heart",
            "B. A story that grips you with tension and thrills",
            "C. A story about uncovering strange rules and worlds",
            "D. A light story that makes me laugh and unwind",
        ],
        genres: [Drama, Action, SciFi, Comedy],
        deltas: &MOOD_DELTAS,
    },
    Question {
        prompt: "Q7. Which way of telling a story draws you in more?",
        options: [
            "A. Characters' feelings building up little by little",
            "B. Charging straight at a goal",
            "C. Clues and twists that make me think",
            "D. Unexpected situations exploding one after another",
        ],
        genres: [Drama, Action, SciFi, Comedy],
        deltas: &STORY_DELTAS,
    },
    Question {
        prompt: "Q8. In a relationship story, which flavour do you like best?",
        options: [
            "A. Shifting feelings and chemistry between two people",
            "B. Comrades covering each other's backs in a crisis",
            "C. Grand ties of fate and prophecy",
            "D. Comic chemistry with lively back-and-forth",
        ],
        genres: [Romance, Action, Fantasy, Comedy],
        deltas: &RELATIONSHIP_DELTAS,
    },
    Question {
        prompt: "Q9. Which kind of scene do you love most in a movie?",
        options: [
            "A. A single line of dialogue that changes the whole mood",
            "B. Highlight scenes: chases, fights, daring challenges",
            "C. Visuals and worlds beyond imagination unfolding",
            "D. A scene so funny it turns into a meme",
        ],
        genres: [Drama, Action, Fantasy, Comedy],
        deltas: &SCENE_DELTAS,
    },
    Question {
        prompt: "Q10. What feeling do you want to be left with afterwards?",
        options: [
            "A. A heavy or warm heart that keeps me thinking for days",
            "B. \"That was refreshing!\" and a mood boost",
            "C. \"I want to know more about this world\" and the urge to dig in",
            "D. So funny I want to share it with friends right away",
        ],
        genres: [Drama, Action, SciFi, Comedy],
        deltas: &AFTERTASTE_DELTAS,
    },
];

/// Letter shown for an option index (0 -> 'A')
pub fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Parse a single answer token: a letter A-D (any case) or a digit 0-3.
pub fn parse_answer(token: &str) -> Result<usize> {
    let token = token.trim();
    let mut chars = token.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(QuizError::InvalidAnswer(token.to_string()));
    };

    let index = match c.to_ascii_uppercase() {
        letter @ 'A'..='D' => letter as usize - 'A' as usize,
        digit @ '0'..='3' => digit as usize - '0' as usize,
        _ => return Err(QuizError::InvalidAnswer(token.to_string())),
    };
    Ok(index)
}

/// Parse a whole answer sheet.
///
/// Accepts either a compact string (`"ABCDA BCDAB"`) or a separated list
/// (`"A,b,2,D"`). Whitespace and commas are ignored. The count is not
/// checked here; the profile builder does that.
pub fn parse_answers(input: &str) -> Result<Vec<usize>> {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| parse_answer(&c.to_string()))
        .collect()
}
