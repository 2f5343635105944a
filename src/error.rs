use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;

/// Pipeline step that produced a user-visible failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Recommend,
    MovieDetail,
    Cast,
    Render,
}

impl Stage {
    /// Alert text shown to the user when this step fails
    pub fn alert_message(&self) -> &'static str {
        match self {
            Stage::Resolve => "Invalid Request",
            Stage::Recommend => "Error getting recommendations",
            Stage::MovieDetail | Stage::Render => "API Error!",
            Stage::Cast => "Invalid Request!",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Resolve => "resolve",
            Stage::Recommend => "recommend",
            Stage::MovieDetail => "movie_detail",
            Stage::Cast => "cast",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("{stage} step failed: {source}")]
    Pipeline {
        stage: Stage,
        #[source]
        source: Box<AppError>,
    },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Tags an upstream failure with the pipeline step it happened in.
    ///
    /// `NotFound` passes through untouched so callers can still tell an empty
    /// result apart from a broken upstream.
    pub fn at(self, stage: Stage) -> Self {
        match self {
            AppError::NotFound(_) | AppError::Pipeline { .. } => self,
            other => AppError::Pipeline {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Step this error is attributed to, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AppError::Pipeline { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::ExternalApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) | AppError::Pipeline { .. } => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
