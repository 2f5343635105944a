use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::session_id::SessionId,
    models::{MovieId, ToggleRequest},
    services::{
        autocomplete::Suggestion, chat::ChatMessage, toggle::ToggleOutcome, Autocomplete,
        RecordingView, RunOutcome, ViewUpdate,
    },
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<Suggestion>,
    pub submit_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenRecommendationRequest {
    pub title: String,
    #[serde(default)]
    pub movie_id: Option<MovieId>,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub outcome: RunOutcome,
    pub updates: Vec<ViewUpdate>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationEvent {
    /// User went back from the details view
    Back,
    /// Tab became hidden
    Hidden,
}

#[derive(Debug, Deserialize)]
pub struct NavigationRequest {
    pub event: NavigationEvent,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponseBody {
    pub committed: bool,
    pub active: bool,
    pub updates: Vec<ViewUpdate>,
}

#[derive(Debug, Deserialize)]
pub struct ChatSendRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    pub history: Vec<ChatMessage>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Suggestions for the search box
pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteQuery>,
) -> Json<AutocompleteResponse> {
    Json(AutocompleteResponse {
        suggestions: state.autocomplete.suggest(&params.q),
        submit_enabled: Autocomplete::submit_enabled(&params.q),
    })
}

/// Search box submit: runs the full details pipeline
pub async fn search(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(request): Json<SearchRequest>,
) -> Json<RunResponse> {
    tracing::info!(session_id = %session_id, title = %request.title, "Processing search");

    let session = state.session(session_id).await;
    let mut view = RecordingView::new();
    let outcome = state.search.search(&session, &request.title, &mut view).await;

    Json(RunResponse {
        outcome,
        updates: view.into_updates(),
    })
}

/// Recommendation card click
pub async fn open_recommendation(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(request): Json<OpenRecommendationRequest>,
) -> Json<RunResponse> {
    tracing::info!(
        session_id = %session_id,
        title = %request.title,
        movie_id = ?request.movie_id,
        "Opening recommendation"
    );

    let session = state.session(session_id).await;
    let mut view = RecordingView::new();
    let outcome = state
        .search
        .open_recommendation(&session, &request.title, request.movie_id, &mut view)
        .await;

    Json(RunResponse {
        outcome,
        updates: view.into_updates(),
    })
}

/// Back navigation or tab hidden: closes the open viewing session
pub async fn navigation(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(request): Json<NavigationRequest>,
) -> StatusCode {
    tracing::debug!(session_id = %session_id, event = ?request.event, "Navigation boundary");

    // Nothing to close for a browser that never opened a view
    if let Some(session) = state.existing_session(session_id).await {
        // Fire and forget; the beacon task outlives this request
        let _ = session.beacon.flush().await;
    }
    StatusCode::NO_CONTENT
}

/// Like/save button click
pub async fn toggle(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(request): Json<ToggleRequest>,
) -> Json<ToggleResponseBody> {
    let session = state.session(session_id).await;
    let mut view = RecordingView::new();

    let (committed, active) = match session.toggles.toggle(request, &mut view).await {
        ToggleOutcome::Committed { active } => (true, active),
        ToggleOutcome::Reverted { active } => (false, active),
    };

    Json(ToggleResponseBody {
        committed,
        active,
        updates: view.into_updates(),
    })
}

/// Chat message from the widget
pub async fn chat_send(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Json(request): Json<ChatSendRequest>,
) -> AppResult<Json<ChatHistoryResponse>> {
    let session = state.session(session_id).await;
    let reply = session.chat.send(&request.message).await?;

    Ok(Json(ChatHistoryResponse {
        reply,
        history: session.chat.history().await,
    }))
}

/// Chat transcript for the session, used when the page reloads
pub async fn chat_history(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Json<ChatHistoryResponse> {
    let history = match state.existing_session(session_id).await {
        Some(session) => session.chat.history().await,
        None => Vec::new(),
    };

    Json(ChatHistoryResponse {
        reply: None,
        history,
    })
}
