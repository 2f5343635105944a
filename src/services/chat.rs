use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::{
    error::{AppError, AppResult},
    services::backend::RecommendationBackend,
};

/// Storage key the chat transcript lives under
pub const CHAT_HISTORY_KEY: &str = "chat_history";

/// Bot line appended when the assistant cannot be reached
pub const CHAT_OFFLINE_REPLY: &str = "The assistant is offline right now.";

/// Who wrote a chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub msg: String,
    #[serde(rename = "type")]
    pub speaker: Speaker,
}

/// String key/value storage scoped to one browser session
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Option<String>;
    async fn set_item(&self, key: &str, value: String);
}

/// In-memory [`SessionStore`]; lives exactly as long as its session
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().await.get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: String) {
        self.items.write().await.insert(key.to_string(), value);
    }
}

/// Request/response chat whose transcript persists for the session
pub struct ChatWidget {
    backend: Arc<dyn RecommendationBackend>,
    store: Arc<dyn SessionStore>,
    // Serializes read-modify-write of the stored transcript
    write_lock: Mutex<()>,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn RecommendationBackend>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Transcript so far; unreadable storage counts as empty
    pub async fn history(&self) -> Vec<ChatMessage> {
        let Some(raw) = self.store.get_item(CHAT_HISTORY_KEY).await else {
            return Vec::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding unreadable chat history");
            Vec::new()
        })
    }

    async fn append(&self, msg: String, speaker: Speaker) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut history = self.history().await;
        history.push(ChatMessage { msg, speaker });

        let encoded = serde_json::to_string(&history)
            .map_err(|e| AppError::Internal(format!("Failed to encode chat history: {}", e)))?;
        self.store.set_item(CHAT_HISTORY_KEY, encoded).await;
        Ok(())
    }

    /// Sends one user message and records both sides of the exchange.
    ///
    /// Blank messages are ignored and return `Ok(None)`. Otherwise the bot's
    /// reply (or the offline line) is returned.
    pub async fn send(&self, message: &str) -> AppResult<Option<String>> {
        if message.trim().is_empty() {
            return Ok(None);
        }

        self.append(message.to_string(), Speaker::User).await?;

        let reply = match self.backend.chat(message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                CHAT_OFFLINE_REPLY.to_string()
            }
        };

        self.append(reply.clone(), Speaker::Bot).await?;
        Ok(Some(reply))
    }
}
