// src/services/session_manager.rs
//! Per-viewer transcripts for the chat page. Display only: nothing here is
//! ever sent to the relay.
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str =
    "Welcome to StudyBuddy! 🎓 I'm here to help you with Computer Science topics.";

#[derive(Clone, Debug, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(skip)]
    pub timestamp: DateTime<Local>,
    /// `HH:MM`, as shown next to the bubble.
    pub time: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        let timestamp = Local::now();
        Self {
            role,
            content: content.into(),
            time: timestamp.format("%H:%M").to_string(),
            timestamp,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Last known reachability of the relay, from its health route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    #[default]
    Unknown,
    Online,
    Error,
    Offline,
}

impl ApiStatus {
    pub fn is_online(self) -> bool {
        self == ApiStatus::Online
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub messages: Vec<Message>,
    pub api_status: ApiStatus,
    pub last_active: Instant,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(MessageRole::System, WELCOME_MESSAGE)],
            api_status: ApiStatus::Unknown,
            last_active: Instant::now(),
        }
    }
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    // Create a fresh session and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session::new();

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        id
    }

    // Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(Session::new);
        id.to_string()
    }

    // Append a message to a session's history and touch last_active.
    pub async fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: impl Into<String>,
    ) -> usize {
        let mut guard = self.inner.write().await;
        let entry = guard
            .entry(session_id.to_string())
            .or_insert_with(Session::new);
        entry.messages.push(Message::new(role, content));
        entry.last_active = Instant::now();
        entry.messages.len()
    }

    /// Get a copy of the session history
    pub async fn get_history(&self, session_id: &str) -> Option<Vec<Message>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.messages.clone())
    }

    /// Drop everything but a fresh welcome message.
    pub async fn clear_history(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        match guard.get_mut(session_id) {
            Some(session) => {
                session.messages = vec![Message::new(MessageRole::System, WELCOME_MESSAGE)];
                session.last_active = Instant::now();
                true
            }
            None => false,
        }
    }

    pub async fn set_status(&self, session_id: &str, status: ApiStatus) {
        let mut guard = self.inner.write().await;
        if let Some(session) = guard.get_mut(session_id) {
            session.api_status = status;
            session.last_active = Instant::now();
        }
    }

    pub async fn get_status(&self, session_id: &str) -> ApiStatus {
        let guard = self.inner.read().await;
        guard
            .get(session_id)
            .map(|s| s.api_status)
            .unwrap_or_default()
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
