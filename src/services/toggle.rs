use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    error::AppError,
    models::{MovieId, ToggleAction, ToggleRequest},
    services::{backend::RecommendationBackend, view::ViewSink},
};

/// Result of one like/save click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The backend accepted the change; `active` is the new state
    Committed { active: bool },
    /// The backend rejected or never received it; state rolled back to `active`
    Reverted { active: bool },
}

/// Optimistic like/save buttons.
///
/// A click flips local state and the view at once, then persists the change.
/// When persisting fails the flip is compensated. Local state starts out
/// inactive and is corrected from the backend's `added`/`removed` reply. Concurrent clicks on the same
/// movie are not coordinated: whichever response lands last decides.
pub struct LikeSaveToggle {
    backend: Arc<dyn RecommendationBackend>,
    states: Mutex<HashMap<(MovieId, ToggleAction), bool>>,
}

impl LikeSaveToggle {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self {
            backend,
            states: Mutex::new(HashMap::new()),
        }
    }

    pub async fn is_active(&self, action: ToggleAction, movie_id: MovieId) -> bool {
        self.states
            .lock()
            .await
            .get(&(movie_id, action))
            .copied()
            .unwrap_or(false)
    }

    pub async fn toggle(&self, request: ToggleRequest, view: &mut dyn ViewSink) -> ToggleOutcome {
        let action = request.action;
        let movie_id = request.movie_id;

        // Apply locally
        let previous = {
            let mut states = self.states.lock().await;
            let slot = states.entry((movie_id, action)).or_insert(false);
            let previous = *slot;
            *slot = !previous;
            previous
        };
        view.set_toggle(action, movie_id, !previous);

        // Commit remotely
        let failure = match self.backend.toggle_action(request).await {
            Ok(response) if response.is_success() => {
                tracing::info!(
                    action = %action,
                    movie_id = movie_id,
                    result = response.action.as_deref().unwrap_or("unknown"),
                    "Toggle saved"
                );

                // The backend flips its own copy, which may disagree with ours
                let active = match response.action.as_deref() {
                    Some("added") => true,
                    Some("removed") => false,
                    _ => !previous,
                };
                if active == previous {
                    self.states.lock().await.insert((movie_id, action), active);
                    view.set_toggle(action, movie_id, active);
                }
                return ToggleOutcome::Committed { active };
            }
            Ok(response) => AppError::ExternalApi(format!(
                "toggle_action replied with status {}",
                response.status
            )),
            Err(e) => e,
        };

        // Compensate
        tracing::warn!(
            error = %failure,
            action = %action,
            movie_id = movie_id,
            "Toggle not saved, reverting"
        );
        self.states.lock().await.insert((movie_id, action), previous);
        view.set_toggle(action, movie_id, previous);

        ToggleOutcome::Reverted { active: previous }
    }
}
