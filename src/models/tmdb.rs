use serde::Deserialize;

use super::{MovieId, MovieSummary, PersonId};

// ============================================================================
// TMDB API Types
// ============================================================================

/// Envelope of `GET /search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchHit>,
}

/// Single movie search result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbSearchHit {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl From<TmdbSearchHit> for MovieSummary {
    fn from(hit: TmdbSearchHit) -> Self {
        MovieSummary {
            id: hit.id,
            title: hit.title,
            original_title: hit.original_title,
        }
    }
}

/// Response of `GET /movie/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovieDetail {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbGenre {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// Response of `GET /movie/{id}/credits`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbCastMember {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Response of `GET /person/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TmdbPerson {
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
}
