use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle, time::Instant};

use crate::{models::InteractionLog, services::backend::RecommendationBackend};

/// The details view currently open, if any
#[derive(Debug, Clone)]
struct ViewingSession {
    title: String,
    started_at: Instant,
}

/// Reports how long each details view stayed open.
///
/// At most one viewing session is tracked. `flush` is called on every
/// boundary event (new search, card click, back navigation, tab hidden) and
/// is a no-op when nothing is open.
pub struct BeaconLogger {
    backend: Arc<dyn RecommendationBackend>,
    current: Mutex<Option<ViewingSession>>,
}

impl BeaconLogger {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self {
            backend,
            current: Mutex::new(None),
        }
    }

    /// Opens a viewing session, replacing any unflushed one
    pub async fn start(&self, title: &str) {
        if title.is_empty() {
            return;
        }

        let mut current = self.current.lock().await;
        if let Some(stale) = current.as_ref() {
            tracing::debug!(title = %stale.title, "Dropping unflushed viewing session");
        }
        *current = Some(ViewingSession {
            title: title.to_string(),
            started_at: Instant::now(),
        });
    }

    /// Title of the open viewing session
    pub async fn current_title(&self) -> Option<String> {
        self.current.lock().await.as_ref().map(|s| s.title.clone())
    }

    /// Closes the open session and sends its duration without waiting for delivery.
    ///
    /// Returns the handle of the spawned send, or `None` when nothing was open.
    pub async fn flush(&self) -> Option<JoinHandle<()>> {
        let session = self.current.lock().await.take()?;

        let log = InteractionLog {
            title: session.title,
            duration: session.started_at.elapsed().as_secs_f64(),
        };

        tracing::debug!(title = %log.title, duration = log.duration, "Sending interaction beacon");

        let backend = self.backend.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = backend.log_interaction(log).await {
                tracing::debug!(error = %e, "Interaction beacon was not delivered");
            }
        }))
    }
}
