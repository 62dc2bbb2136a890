use super::Runtime;
use crate::validator::{self, Validator};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Earliest accepted release year is the year after this one.
pub const MIN_YEAR_EXCLUSIVE: i32 = 1888;
/// Maximum title length in bytes.
pub const MAX_TITLE_BYTES: usize = 500;
pub const MAX_GENRES: usize = 5;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    /// Unique positive identifier, assigned by storage.
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    pub runtime: Runtime,
    pub genres: Vec<String>,
    /// Starts at 1 and is bumped on every update.
    pub version: i32,
}

/// Request body accepted by `POST /v1/movies`.
///
/// Every field defaults when absent, and `title`, `year` and `genres` also
/// default when `null`, so those values reach validation (and produce "must be
/// provided") instead of failing the decode. A `null` runtime is rejected by
/// [`Runtime`] itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateMovieInput {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub year: i32,
    pub runtime: Runtime,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Movie {
    /// Build an unsaved movie from client input. `id` stays 0 until storage
    /// assigns one.
    #[must_use]
    pub fn from_input(input: CreateMovieInput) -> Self {
        Self {
            id: 0,
            created_at: Utc::now(),
            title: input.title,
            year: input.year,
            runtime: input.runtime,
            genres: input.genres,
            version: 1,
        }
    }
}

/// Run every movie check against `v`, using `current_year` as the upper bound
/// for `year`.
pub fn validate_movie_in_year(v: &mut Validator, movie: &Movie, current_year: i32) {
    v.check(!movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() <= MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(movie.year != 0, "year", "must be provided");
    v.check(
        movie.year > MIN_YEAR_EXCLUSIVE,
        "year",
        "must be greater than 1888",
    );
    v.check(movie.year <= current_year, "year", "must not be in the future");

    v.check(movie.runtime.minutes() != 0, "runtime", "must be provided");
    v.check(
        movie.runtime.minutes() > 0,
        "runtime",
        "must be a positive integer",
    );

    v.check(
        !movie.genres.is_empty(),
        "genres",
        "must contain at least 1 genre",
    );
    v.check(
        movie.genres.len() <= MAX_GENRES,
        "genres",
        "must not contain more than 5 genres",
    );
    v.check(
        validator::unique(&movie.genres),
        "genres",
        "must not contain duplicate values",
    );
}

/// Validate against the current calendar year.
pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    validate_movie_in_year(v, movie, Utc::now().year());
}
