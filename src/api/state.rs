use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::{
    config::Config,
    error::AppResult,
    middleware::session_id::SessionId,
    services::{
        providers::{MetadataProvider, TmdbProvider},
        Autocomplete, DetailsRenderer, EnrichmentPipeline, HttpBackend, PipelineOptions,
        RecommendationBackend, SearchController, Session,
    },
};

/// Idle time after which a browser session and its state are dropped
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

struct SessionEntry {
    session: Arc<Session>,
    last_seen: Instant,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: SearchController,
    pub autocomplete: Arc<Autocomplete>,
    pub backend: Arc<dyn RecommendationBackend>,
    sessions: Arc<Mutex<HashMap<SessionId, SessionEntry>>>,
    session_idle: Duration,
}

impl AppState {
    /// Wires the controller and per-session services around the given collaborators
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        backend: Arc<dyn RecommendationBackend>,
        autocomplete: Autocomplete,
        options: PipelineOptions,
    ) -> Self {
        let pipeline = EnrichmentPipeline::new(metadata, backend.clone(), options);
        let renderer = DetailsRenderer::new(backend.clone());

        Self {
            search: SearchController::new(pipeline, renderer),
            autocomplete: Arc::new(autocomplete),
            backend,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            session_idle: DEFAULT_SESSION_IDLE,
        }
    }

    pub fn with_session_idle(mut self, idle: Duration) -> Self {
        self.session_idle = idle;
        self
    }

    /// Builds the production state: TMDB, HTTP backend, suggestions file
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let http_client = reqwest::Client::new();

        let metadata = Arc::new(TmdbProvider::new(
            http_client.clone(),
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
        ));
        let backend = Arc::new(HttpBackend::new(http_client, config.backend_url.clone()));

        let autocomplete = match &config.suggestions_path {
            Some(path) => Autocomplete::from_file(path)?,
            None => Autocomplete::default(),
        };

        let state = Self::new(
            metadata,
            backend,
            autocomplete,
            PipelineOptions {
                image_base_url: config.tmdb_image_url.clone(),
                lookup_concurrency: config.lookup_concurrency,
            },
        );
        Ok(state.with_session_idle(Duration::from_secs(config.session_idle_secs)))
    }

    /// Returns the session for `id`, creating it on first use.
    ///
    /// Creating a session also drops every session idle for longer than the
    /// configured window, so the map only holds recently active browsers.
    pub async fn session(&self, id: SessionId) -> Arc<Session> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock().await;

        if let Some(entry) = sessions.get_mut(&id) {
            entry.last_seen = now;
            return entry.session.clone();
        }

        self.evict_idle(&mut sessions, now);

        tracing::debug!(session_id = %id, "Opening browser session");
        let session = Arc::new(Session::new(self.backend.clone()));
        sessions.insert(
            id,
            SessionEntry {
                session: session.clone(),
                last_seen: now,
            },
        );
        session
    }

    /// Returns the session for `id` only if it is already open
    pub async fn existing_session(&self, id: SessionId) -> Option<Arc<Session>> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, SessionEntry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.session_idle);

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, live = sessions.len(), "Evicted idle sessions");
        }
    }
}
