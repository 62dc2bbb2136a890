//! Domain types for the movie catalog.

mod movies;
mod runtime;

pub use movies::{
    validate_movie, validate_movie_in_year, CreateMovieInput, Movie, MAX_GENRES, MAX_TITLE_BYTES,
    MIN_YEAR_EXCLUSIVE,
};
pub use runtime::{Runtime, RuntimeError};
