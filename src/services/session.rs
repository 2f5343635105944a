use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::services::{
    backend::RecommendationBackend,
    beacon::BeaconLogger,
    chat::{ChatWidget, MemorySessionStore},
    toggle::LikeSaveToggle,
};

/// Everything that belongs to one browser session
pub struct Session {
    pub beacon: BeaconLogger,
    pub toggles: LikeSaveToggle,
    pub chat: ChatWidget,
    latest_run: AtomicU64,
}

impl Session {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self {
            beacon: BeaconLogger::new(backend.clone()),
            toggles: LikeSaveToggle::new(backend.clone()),
            chat: ChatWidget::new(backend, Arc::new(MemorySessionStore::new())),
            latest_run: AtomicU64::new(0),
        }
    }

    /// Claims a ticket for a new details run; it supersedes all earlier ones
    pub fn begin_run(&self) -> u64 {
        self.latest_run.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether no run started after the one holding `ticket`
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest_run.load(Ordering::SeqCst) == ticket
    }
}
