use serde::{Deserialize, Serialize};

pub mod backend;
pub mod tmdb;

pub use backend::*;
pub use tmdb::*;

/// TMDB movie identifier
pub type MovieId = u64;

/// TMDB person identifier
pub type PersonId = u64;

/// Placeholder used when a cast member has no profile image
pub const PROFILE_PLACEHOLDER: &str = "https://placehold.co/300x450?text=No+Photo";

/// Placeholder used when a movie has no poster
pub const POSTER_PLACEHOLDER: &str = "https://placehold.co/500x750?text=No+Image";

/// Sentinel for missing birthdays, places of birth and release dates
pub const NOT_AVAILABLE: &str = "Not Available";

/// Sentinel for a missing biography
pub const NO_BIOGRAPHY: &str = "No biography available.";

/// Maximum number of cast members carried into a details view
pub const MAX_CAST: usize = 10;

/// Delimiter the similarity endpoint joins recommended titles with
pub const RECOMMENDATION_DELIMITER: &str = "---";

/// The canonical movie chosen for a free-text query (first search hit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub original_title: String,
}

/// Ordered list of recommended titles, exactly as the backend returned them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet(Vec<String>);

impl RecommendationSet {
    /// Splits a raw similarity response on `---`.
    ///
    /// Elements are kept verbatim: no trimming, no dedup, no reordering.
    pub fn split(raw: &str) -> Self {
        Self(raw.split(RECOMMENDATION_DELIMITER).map(str::to_string).collect())
    }

    pub fn titles(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// One billed cast member of the canonical movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastEntry {
    pub id: PersonId,
    pub name: String,
    pub character: String,
    pub profile_url: String,
}

/// Biographical fields for a cast member; absent values hold sentinels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetail {
    pub birthday: String,
    pub biography: String,
    pub place_of_birth: String,
}

impl PersonDetail {
    /// All-sentinel detail, used when the person lookup itself fails
    pub fn unavailable() -> Self {
        Self {
            birthday: NOT_AVAILABLE.to_string(),
            biography: NO_BIOGRAPHY.to_string(),
            place_of_birth: NOT_AVAILABLE.to_string(),
        }
    }
}

/// A cast entry paired with its person detail.
///
/// Pairing them in one struct keeps every cast column index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub entry: CastEntry,
    pub detail: PersonDetail,
}

/// A recommended title and the poster found for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCard {
    pub title: String,
    pub poster: String,
}

/// Fully decorated payload handed to the details renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub movie: MovieSummary,
    /// Title shown on the details page (the canonical movie's original title)
    pub display_title: String,
    pub imdb_id: String,
    pub poster: String,
    pub genres: String,
    pub overview: String,
    pub rating: String,
    pub vote_count: String,
    pub release_date: String,
    pub runtime: String,
    pub status: String,
    pub recommendations: Vec<RecommendationCard>,
    pub cast: Vec<CastMember>,
}

impl EnrichedRecord {
    pub fn cast_ids(&self) -> Vec<PersonId> {
        self.cast.iter().map(|c| c.entry.id).collect()
    }

    pub fn cast_names(&self) -> Vec<&str> {
        self.cast.iter().map(|c| c.entry.name.as_str()).collect()
    }

    pub fn cast_characters(&self) -> Vec<&str> {
        self.cast.iter().map(|c| c.entry.character.as_str()).collect()
    }

    pub fn cast_profiles(&self) -> Vec<&str> {
        self.cast.iter().map(|c| c.entry.profile_url.as_str()).collect()
    }

    pub fn cast_birthdays(&self) -> Vec<&str> {
        self.cast.iter().map(|c| c.detail.birthday.as_str()).collect()
    }

    pub fn cast_biographies(&self) -> Vec<&str> {
        self.cast.iter().map(|c| c.detail.biography.as_str()).collect()
    }

    pub fn cast_places(&self) -> Vec<&str> {
        self.cast
            .iter()
            .map(|c| c.detail.place_of_birth.as_str())
            .collect()
    }

    pub fn recommendation_titles(&self) -> Vec<&str> {
        self.recommendations.iter().map(|r| r.title.as_str()).collect()
    }

    pub fn recommendation_posters(&self) -> Vec<&str> {
        self.recommendations
            .iter()
            .map(|r| r.poster.as_str())
            .collect()
    }
}
