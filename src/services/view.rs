use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{MovieId, ToggleAction};

/// How long the loader stays up after a run completes, to avoid flicker
pub const LOADER_GRACE: Duration = Duration::from_millis(500);

/// One instruction for the browser view, applied in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewUpdate {
    ShowLoader,
    DismissLoader { delay_ms: u64 },
    ShowNoResults,
    Alert { message: String },
    ReplaceResults { html: String },
    SetToggle {
        action: ToggleAction,
        movie_id: MovieId,
        active: bool,
    },
}

/// Port to the page the user is looking at
pub trait ViewSink: Send {
    fn apply(&mut self, update: ViewUpdate);

    fn show_loader(&mut self) {
        self.apply(ViewUpdate::ShowLoader);
    }

    fn dismiss_loader(&mut self, after: Duration) {
        self.apply(ViewUpdate::DismissLoader {
            delay_ms: after.as_millis() as u64,
        });
    }

    fn show_no_results(&mut self) {
        self.apply(ViewUpdate::ShowNoResults);
    }

    fn alert(&mut self, message: &str) {
        self.apply(ViewUpdate::Alert {
            message: message.to_string(),
        });
    }

    fn replace_results(&mut self, html: String) {
        self.apply(ViewUpdate::ReplaceResults { html });
    }

    fn set_toggle(&mut self, action: ToggleAction, movie_id: MovieId, active: bool) {
        self.apply(ViewUpdate::SetToggle {
            action,
            movie_id,
            active,
        });
    }
}

/// Collects updates so they can be shipped to the browser in one response
#[derive(Debug, Default, Clone)]
pub struct RecordingView {
    updates: Vec<ViewUpdate>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[ViewUpdate] {
        &self.updates
    }

    pub fn into_updates(self) -> Vec<ViewUpdate> {
        self.updates
    }
}

impl ViewSink for RecordingView {
    fn apply(&mut self, update: ViewUpdate) {
        self.updates.push(update);
    }
}
