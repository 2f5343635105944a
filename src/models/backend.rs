use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::MovieId;

// ============================================================================
// Recommendation Backend Types
// ============================================================================

/// Literal body the similarity endpoint returns for an unknown title
pub const SIMILARITY_NOT_FOUND: &str = "Sorry! try another movie name";

/// Kind of persisted per-user mark on a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Like,
    Save,
}

impl Display for ToggleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToggleAction::Like => write!(f, "like"),
            ToggleAction::Save => write!(f, "save"),
        }
    }
}

/// Body of `POST /toggle_action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub action: ToggleAction,
    pub movie_id: MovieId,
    pub title: String,
    pub poster: String,
}

/// Reply of `POST /toggle_action`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToggleResponse {
    pub status: String,
    /// "added" or "removed" when the backend accepted the toggle
    #[serde(default)]
    pub action: Option<String>,
}

impl ToggleResponse {
    pub fn is_success(&self) -> bool {
        self.status != "error"
    }
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Reply of `POST /chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Body of the `POST /log_interaction` beacon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionLog {
    pub title: String,
    /// Seconds the details view was open
    pub duration: f64,
}
