/// Recommendation backend client
///
/// The backend owns the similarity model, the details-page templating, per-user
/// like/save lists, the chat assistant and interaction logging. All five
/// endpoints are opaque request/response contracts.
use crate::{
    error::{AppError, AppResult},
    models::{ChatRequest, ChatResponse, InteractionLog, ToggleRequest, ToggleResponse},
};
use reqwest::{Client as HttpClient, Response};

/// Trait for the recommendation backend
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// `POST /similarity`: raw `---`-joined titles or the not-found sentinel
    async fn similar_titles(&self, title: &str) -> AppResult<String>;

    /// `POST /recommend`: form-encoded details, returns an HTML fragment
    async fn render_details(&self, fields: Vec<(String, String)>) -> AppResult<String>;

    /// `POST /toggle_action`
    async fn toggle_action(&self, request: ToggleRequest) -> AppResult<ToggleResponse>;

    /// `POST /chat`
    async fn chat(&self, message: &str) -> AppResult<String>;

    /// `POST /log_interaction`
    async fn log_interaction(&self, log: InteractionLog) -> AppResult<()>;
}

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    pub fn new(http_client: HttpClient, base_url: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ensure_success(path: &str, response: Response) -> AppResult<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Backend {} returned status {}: {}",
                path, status, body
            )));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    async fn similar_titles(&self, title: &str) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.endpoint("/similarity"))
            .form(&[("name", title)])
            .send()
            .await?;

        let response = Self::ensure_success("/similarity", response).await?;
        Ok(response.text().await?)
    }

    async fn render_details(&self, fields: Vec<(String, String)>) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.endpoint("/recommend"))
            .form(&fields)
            .send()
            .await?;

        let response = Self::ensure_success("/recommend", response).await?;
        Ok(response.text().await?)
    }

    async fn toggle_action(&self, request: ToggleRequest) -> AppResult<ToggleResponse> {
        let response = self
            .http_client
            .post(self.endpoint("/toggle_action"))
            .json(&request)
            .send()
            .await?;

        let response = Self::ensure_success("/toggle_action", response).await?;
        Ok(response.json().await?)
    }

    async fn chat(&self, message: &str) -> AppResult<String> {
        let response = self
            .http_client
            .post(self.endpoint("/chat"))
            .json(&ChatRequest { message })
            .send()
            .await?;

        let response = Self::ensure_success("/chat", response).await?;
        let reply: ChatResponse = response.json().await?;
        Ok(reply.response)
    }

    async fn log_interaction(&self, log: InteractionLog) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.endpoint("/log_interaction"))
            .json(&log)
            .send()
            .await?;

        Self::ensure_success("/log_interaction", response).await?;
        Ok(())
    }
}
