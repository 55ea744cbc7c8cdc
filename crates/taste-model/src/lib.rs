//! # Taste Model Crate
//!
//! Static data and core types shared by every other crate in the workspace.
//!
//! ## Main Components
//!
//! - **types**: Domain types (Genre, Axis, TraitVector, GenreWeights, UserProfile, Movie)
//! - **traits**: Genre archetypes on the trait axes and per-movie trait vectors
//! - **quiz**: The ten quiz questions with their genre votes and axis deltas
//! - **error**: Error types for quiz input validation
//!
//! ## Example Usage
//!
//! ```ignore
//! use taste_model::{Genre, Movie, movie_traits};
//!
//! let movie = Movie {
//!     id: 603,
//!     title: "The Matrix".to_string(),
//!     genre_ids: vec![Genre::Action.catalog_id(), Genre::SciFi.catalog_id()],
//!     ..Default::default()
//! };
//!
//! let traits = movie_traits(&movie);
//! println!("escape = {:.2}", traits.get(taste_model::Axis::Escape));
//! ```
//!
//! Nothing in this crate does I/O. All tables are `const` and every lookup is
//! total: a genre or axis can never be "missing".

// Public modules
pub mod error;
pub mod quiz;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{QuizError, Result};
pub use quiz::{OPTION_COUNT, QUESTIONS, Question, parse_answer, parse_answers};
pub use traits::{archetype, average_archetype, movie_traits};
pub use types::{
    Axis, CatalogGenreId, GENRE_PRIORITY, Genre, GenreWeights, Movie, MovieId, POSTER_BASE_URL,
    TraitVector, UserProfile,
};
