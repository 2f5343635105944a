use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult, Stage},
    models::EnrichedRecord,
    services::backend::RecommendationBackend,
};

/// Posts an [`EnrichedRecord`] to the backend's `/recommend` template and
/// returns the HTML fragment it produces. Templating is owned by the backend.
#[derive(Clone)]
pub struct DetailsRenderer {
    backend: Arc<dyn RecommendationBackend>,
}

impl DetailsRenderer {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self { backend }
    }

    pub async fn render(&self, record: &EnrichedRecord) -> AppResult<String> {
        let fields = form_fields(record)?;

        let html = self
            .backend
            .render_details(fields)
            .await
            .map_err(|e| e.at(Stage::Render))?;

        tracing::debug!(
            movie_id = record.movie.id,
            bytes = html.len(),
            "Details fragment rendered"
        );

        Ok(html)
    }
}

fn encode<T: Serialize + ?Sized>(name: &str, value: &T) -> AppResult<(String, String)> {
    let encoded = serde_json::to_string(value)
        .map_err(|e| AppError::Internal(format!("Failed to encode {}: {}", name, e)))?;
    Ok((name.to_string(), encoded))
}

fn plain(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

/// Flattens a record into the `/recommend` form.
///
/// Scalars are sent as-is; every list is JSON-encoded into a single field.
pub fn form_fields(record: &EnrichedRecord) -> AppResult<Vec<(String, String)>> {
    Ok(vec![
        plain("movie_id", &record.movie.id.to_string()),
        plain("title", &record.display_title),
        encode("cast_ids", &record.cast_ids())?,
        encode("cast_names", &record.cast_names())?,
        encode("cast_chars", &record.cast_characters())?,
        encode("cast_profiles", &record.cast_profiles())?,
        encode("cast_bdays", &record.cast_birthdays())?,
        encode("cast_bios", &record.cast_biographies())?,
        encode("cast_places", &record.cast_places())?,
        plain("imdb_id", &record.imdb_id),
        plain("poster", &record.poster),
        plain("genres", &record.genres),
        plain("overview", &record.overview),
        plain("rating", &record.rating),
        plain("vote_count", &record.vote_count),
        plain("release_date", &record.release_date),
        plain("runtime", &record.runtime),
        plain("status", &record.status),
        encode("rec_movies", &record.recommendation_titles())?,
        encode("rec_posters", &record.recommendation_posters())?,
    ])
}
