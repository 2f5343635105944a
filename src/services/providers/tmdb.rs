/// TMDB (The Movie Database) metadata provider
///
/// API Flow:
/// 1. Title Search: /search/movie?query= → TMDB ID, titles, poster path
/// 2. Detail: /movie/{id} → genres, rating, runtime, release date
/// 3. Credits: /movie/{id}/credits → billed cast
/// 4. Person: /person/{id} → birthday, biography, place of birth
use crate::{
    error::{AppError, AppResult},
    models::{
        MovieId, PersonId, TmdbCredits, TmdbMovieDetail, TmdbPerson, TmdbSearchHit,
        TmdbSearchResponse,
    },
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// GET a TMDB path with the API key plus extra query params and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.endpoint(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for {}: {}",
                status, path, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<TmdbSearchHit>> {
        // TMDB matches nothing for a blank query; skip the round trip
        if query.trim().is_empty() {
            tracing::debug!(query = %query, provider = "tmdb", "Blank search query");
            return Ok(Vec::new());
        }

        let response: TmdbSearchResponse =
            self.get_json("/search/movie", &[("query", query)]).await?;

        tracing::debug!(
            query = %query,
            results = response.results.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(response.results)
    }

    async fn movie_detail(&self, id: MovieId) -> AppResult<TmdbMovieDetail> {
        self.get_json(&format!("/movie/{}", id), &[]).await
    }

    async fn movie_credits(&self, id: MovieId) -> AppResult<TmdbCredits> {
        let credits: TmdbCredits = self.get_json(&format!("/movie/{}/credits", id), &[]).await?;

        tracing::debug!(
            movie_id = id,
            cast = credits.cast.len(),
            provider = "tmdb",
            "Credits fetched"
        );

        Ok(credits)
    }

    async fn person(&self, id: PersonId) -> AppResult<TmdbPerson> {
        self.get_json(&format!("/person/{}", id), &[]).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
