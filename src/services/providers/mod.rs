/// Movie metadata provider abstraction
///
/// The enrichment pipeline only talks to this trait, so the TMDB client can be
/// swapped for a mock in tests or another metadata source later.
use crate::{
    error::AppResult,
    models::{MovieId, PersonId, TmdbCredits, TmdbMovieDetail, TmdbPerson, TmdbSearchHit},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies by free-text title, in the provider's relevance order
    async fn search_movies(&self, query: &str) -> AppResult<Vec<TmdbSearchHit>>;

    /// Fetch full detail (genres, rating, runtime, ...) for one movie
    async fn movie_detail(&self, id: MovieId) -> AppResult<TmdbMovieDetail>;

    /// Fetch the credits of one movie; cast is in billing order
    async fn movie_credits(&self, id: MovieId) -> AppResult<TmdbCredits>;

    /// Fetch biographical detail for one person
    async fn person(&self, id: PersonId) -> AppResult<TmdbPerson>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
