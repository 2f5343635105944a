use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult, Stage},
    models::{
        CastEntry, CastMember, EnrichedRecord, MovieId, MovieSummary, PersonDetail,
        RecommendationCard, RecommendationSet, TmdbMovieDetail, TmdbPerson, MAX_CAST,
        NOT_AVAILABLE, NO_BIOGRAPHY, POSTER_PLACEHOLDER, PROFILE_PLACEHOLDER,
        SIMILARITY_NOT_FOUND,
    },
    services::{
        backend::RecommendationBackend,
        format::{
            clean_biography, format_date_or_sentinel, format_rating, format_runtime,
            group_thousands, image_url, poster_url,
        },
        providers::MetadataProvider,
    },
};

/// Tuning knobs for one pipeline instance
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Prefix joined with TMDB poster/profile paths
    pub image_base_url: String,
    /// Max in-flight person or poster lookups; 1 makes them strictly serial
    pub lookup_concurrency: usize,
}

/// Turns a free-text title into a fully decorated [`EnrichedRecord`].
///
/// Resolve, recommend, detail and credits run one after another and any of
/// them failing aborts the run. Person and poster lookups fan out with bounded
/// concurrency; their results are collected by original index, and a failed
/// lookup degrades to sentinel values instead of aborting.
#[derive(Clone)]
pub struct EnrichmentPipeline {
    metadata: Arc<dyn MetadataProvider>,
    backend: Arc<dyn RecommendationBackend>,
    options: PipelineOptions,
}

impl EnrichmentPipeline {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        backend: Arc<dyn RecommendationBackend>,
        options: PipelineOptions,
    ) -> Self {
        let options = PipelineOptions {
            lookup_concurrency: options.lookup_concurrency.max(1),
            ..options
        };

        Self {
            metadata,
            backend,
            options,
        }
    }

    /// Full run starting from a user-typed title
    #[tracing::instrument(skip(self), fields(provider = self.metadata.name()))]
    pub async fn enrich(&self, title: &str) -> AppResult<EnrichedRecord> {
        let movie = self.resolve(title).await?;
        self.enrich_known(movie).await
    }

    /// Run for a movie whose TMDB id is already known (recommendation card click)
    pub async fn enrich_known(&self, movie: MovieSummary) -> AppResult<EnrichedRecord> {
        let recommendations = self.recommend(&movie.title).await?;

        let detail = self
            .metadata
            .movie_detail(movie.id)
            .await
            .map_err(|e| e.at(Stage::MovieDetail))?;

        let cast = self.cast(movie.id).await?;
        let cast = self.attach_person_details(cast).await;
        let recommendations = self.attach_posters(recommendations).await;

        tracing::info!(
            movie_id = movie.id,
            title = %movie.title,
            recommendations = recommendations.len(),
            cast = cast.len(),
            "Enrichment completed"
        );

        Ok(self.assemble(movie, detail, recommendations, cast))
    }

    /// Picks the first search hit as the canonical movie
    async fn resolve(&self, title: &str) -> AppResult<MovieSummary> {
        let hits = self
            .metadata
            .search_movies(title)
            .await
            .map_err(|e| e.at(Stage::Resolve))?;

        hits.into_iter()
            .next()
            .map(MovieSummary::from)
            .ok_or_else(|| AppError::NotFound(format!("No movie matches '{}'", title)))
    }

    async fn recommend(&self, title: &str) -> AppResult<RecommendationSet> {
        let raw = self
            .backend
            .similar_titles(title)
            .await
            .map_err(|e| e.at(Stage::Recommend))?;

        // The backend joins an empty match list into an empty body
        if raw == SIMILARITY_NOT_FOUND || raw.is_empty() {
            return Err(AppError::NotFound(format!(
                "No recommendations for '{}'",
                title
            )));
        }

        Ok(RecommendationSet::split(&raw))
    }

    async fn cast(&self, movie_id: MovieId) -> AppResult<Vec<CastEntry>> {
        let credits = self
            .metadata
            .movie_credits(movie_id)
            .await
            .map_err(|e| e.at(Stage::Cast))?;

        Ok(credits
            .cast
            .into_iter()
            .take(MAX_CAST)
            .map(|member| CastEntry {
                profile_url: image_url(
                    &self.options.image_base_url,
                    member.profile_path.as_deref(),
                    PROFILE_PLACEHOLDER,
                ),
                id: member.id,
                name: member.name,
                character: member.character,
            })
            .collect())
    }

    async fn attach_person_details(&self, entries: Vec<CastEntry>) -> Vec<CastMember> {
        stream::iter(entries)
            .map(|entry| async move {
                let detail = match self.metadata.person(entry.id).await {
                    Ok(person) => person_detail(person),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            person_id = entry.id,
                            "Person lookup failed, using sentinels"
                        );
                        PersonDetail::unavailable()
                    }
                };
                CastMember { entry, detail }
            })
            .buffered(self.options.lookup_concurrency)
            .collect()
            .await
    }

    async fn attach_posters(&self, recommendations: RecommendationSet) -> Vec<RecommendationCard> {
        stream::iter(recommendations.into_inner())
            .map(|title| async move {
                let poster = match self.metadata.search_movies(&title).await {
                    Ok(hits) => poster_url(
                        &self.options.image_base_url,
                        hits.first().and_then(|hit| hit.poster_path.as_deref()),
                    ),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            title = %title,
                            "Poster lookup failed, using placeholder"
                        );
                        POSTER_PLACEHOLDER.to_string()
                    }
                };
                RecommendationCard { title, poster }
            })
            .buffered(self.options.lookup_concurrency)
            .collect()
            .await
    }

    fn assemble(
        &self,
        movie: MovieSummary,
        detail: TmdbMovieDetail,
        recommendations: Vec<RecommendationCard>,
        cast: Vec<CastMember>,
    ) -> EnrichedRecord {
        let display_title = if movie.original_title.is_empty() {
            movie.title.clone()
        } else {
            movie.original_title.clone()
        };

        let genres = detail
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        EnrichedRecord {
            display_title,
            imdb_id: detail.imdb_id.unwrap_or_default(),
            poster: poster_url(&self.options.image_base_url, detail.poster_path.as_deref()),
            genres,
            overview: detail.overview.unwrap_or_default(),
            rating: format_rating(detail.vote_average),
            vote_count: group_thousands(detail.vote_count),
            release_date: format_date_or_sentinel(detail.release_date.as_deref()),
            runtime: detail
                .runtime
                .map(format_runtime)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: detail.status.unwrap_or_default(),
            movie,
            recommendations,
            cast,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn person_detail(person: TmdbPerson) -> PersonDetail {
    PersonDetail {
        birthday: format_date_or_sentinel(non_empty(person.birthday).as_deref()),
        biography: non_empty(person.biography)
            .map(|bio| clean_biography(&bio))
            .unwrap_or_else(|| NO_BIOGRAPHY.to_string()),
        place_of_birth: non_empty(person.place_of_birth)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}
