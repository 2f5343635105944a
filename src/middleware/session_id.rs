//! Browser session identity.
//!
//! The first response hands the browser an `x-session-id`; the browser sends
//! it back on every later request and all per-session state (run tickets,
//! like/save buttons, chat transcript, viewing timer) is keyed by it. A
//! missing, malformed or nil value is treated as a new browser and a fresh ID
//! is issued.

use std::str::FromStr;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// HTTP header name for the browser session ID
pub const SESSION_ID_HEADER: &str = "x-session-id";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

/// Whether the request carried a usable session ID or got a new one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOrigin {
    Resumed,
    Issued,
}

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reads the session ID a browser sent back, if it is usable
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get(SESSION_ID_HEADER)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SessionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|e| e.to_string())?;
        // An all-zero ID would merge every client that sends it
        if uuid.is_nil() {
            return Err("nil session id".to_string());
        }
        Ok(Self(uuid))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resumes or issues the browser session and echoes its ID on the response.
///
/// Handlers read the ID with `Extension<SessionId>`.
pub async fn session_id_middleware(mut request: Request, next: Next) -> Response {
    let (session_id, origin) = match SessionId::from_headers(request.headers()) {
        Some(id) => (id, SessionOrigin::Resumed),
        None => {
            let id = SessionId::new();
            tracing::debug!(session_id = %id, "Issuing browser session id");
            (id, SessionOrigin::Issued)
        }
    };

    request.extensions_mut().insert(session_id);
    request.extensions_mut().insert(origin);

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&session_id.to_string()) {
        response
            .headers_mut()
            .insert(SESSION_ID_HEADER, header_value);
    }

    response
}

/// Tracing span for one HTTP request, tagged with its session
pub fn make_span_with_session_id(request: &Request<Body>) -> tracing::Span {
    let session_id = request
        .extensions()
        .get::<SessionId>()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let issued = request.extensions().get::<SessionOrigin>() == Some(&SessionOrigin::Issued);

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        session_id = %session_id,
        session_issued = issued,
    )
}
