// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::chatbot::{Intent, Reply};
use super::navigation::{PageLocation, RouteTable};
use crate::error::ChatError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum MessageBody {
    Text(String),
    Html(String),
}

impl MessageBody {
    pub fn as_str(&self) -> &str {
        match self {
            MessageBody::Text(s) | MessageBody::Html(s) => s,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStyle {
    Primary,
    Secondary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionTarget {
    /// Plain hyperlink; the client navigates on click.
    Link { href: String, style: LinkStyle },
    /// Replays the reply for another intent.
    FollowUp { intent: Intent },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub target: ActionTarget,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: MessageRole,
    pub body: MessageBody,
    pub actions: Vec<QuickAction>,
    pub timestamp: DateTime<Utc>,
    pub display_time: String,
}

/// Two-digit hour and minute with an AM/PM marker, e.g. `09:05 PM`.
pub fn display_time(time: NaiveTime) -> String {
    time.format("%I:%M %p").to_string()
}

/// Ordered message history. Messages can only be appended.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn push(&mut self, role: MessageRole, body: MessageBody, actions: Vec<QuickAction>) -> Message {
        let msg = Message {
            id: self.messages.len() as u64 + 1,
            role,
            body,
            actions,
            timestamp: Utc::now(),
            display_time: display_time(Local::now().time()),
        };
        self.messages.push(msg.clone());
        msg
    }

    pub fn get(&self, id: u64) -> Option<&Message> {
        id.checked_sub(1).and_then(|idx| self.messages.get(idx as usize))
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Open,
    Thinking,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub page: PageLocation,
    pub routes: RouteTable,
    pub is_open: bool,
    pub last_intent: Option<Intent>,
    pub pending_replies: u32,
    pub log: MessageLog,
    pub last_active: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>, page_path: &str) -> Self {
        let page = PageLocation::parse(page_path);
        let routes = RouteTable::for_location(&page);
        Self {
            id: id.into(),
            page,
            routes,
            is_open: false,
            last_intent: None,
            pending_replies: 0,
            log: MessageLog::default(),
            last_active: Instant::now(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.pending_replies > 0 {
            Phase::Thinking
        } else if self.is_open {
            Phase::Open
        } else {
            Phase::Idle
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            page_path: self.page.path.clone(),
            depth: self.page.depth,
            is_open: self.is_open,
            phase: self.phase(),
            last_intent: self.last_intent,
            messages: self.log.as_slice().to_vec(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub page_path: String,
    pub depth: usize,
    pub is_open: bool,
    pub phase: Phase,
    pub last_intent: Option<Intent>,
    pub messages: Vec<Message>,
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

    // Create a fresh session for a page view and return its id.
    pub async fn create_session(&self, page_path: &str) -> String {
        let id = Uuid::new_v4().to_string();
        let session = Session::new(id.clone(), page_path);
        tracing::debug!(session_id = %id, depth = session.page.depth, "session created");

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        id
    }

    pub async fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, ChatError> {
        let guard = self.inner.read().await;
        guard
            .get(session_id)
            .map(Session::snapshot)
            .ok_or_else(|| ChatError::SessionNotFound(session_id.to_string()))
    }

    /// Show or hide the widget. Returns the new visibility.
    pub async fn set_open(&self, session_id: &str, open: bool) -> Result<bool, ChatError> {
        self.with_session(session_id, |s| {
            s.is_open = open;
            s.is_open
        })
        .await
    }

    pub async fn toggle(&self, session_id: &str) -> Result<bool, ChatError> {
        self.with_session(session_id, |s| {
            s.is_open = !s.is_open;
            s.is_open
        })
        .await
    }

    /// Append the user's message and enter the thinking phase.
    pub async fn begin_turn(
        &self,
        session_id: &str,
        body: MessageBody,
        require_open: bool,
    ) -> Result<Message, ChatError> {
        let mut guard = self.inner.write().await;
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| ChatError::SessionNotFound(session_id.to_string()))?;
        if require_open && !session.is_open {
            return Err(ChatError::WidgetClosed);
        }
        session.pending_replies += 1;
        session.last_active = Instant::now();
        Ok(session.log.push(MessageRole::User, body, Vec::new()))
    }

    /// Append the bot's reply and leave the thinking phase.
    pub async fn finish_turn(
        &self,
        session_id: &str,
        intent: Intent,
        reply: Reply,
    ) -> Result<Message, ChatError> {
        self.with_session(session_id, |s| {
            s.pending_replies = s.pending_replies.saturating_sub(1);
            s.last_intent = Some(intent);
            s.log.push(MessageRole::Bot, reply.body, reply.actions)
        })
        .await
    }

    /// Append an unsolicited reply unless the visitor already opened the widget.
    pub async fn append_if_idle(&self, session_id: &str, reply: Reply) -> Option<Message> {
        let mut guard = self.inner.write().await;
        let session = guard.get_mut(session_id)?;
        if session.is_open {
            return None;
        }
        Some(session.log.push(MessageRole::Bot, reply.body, reply.actions))
    }

    pub async fn routes(&self, session_id: &str) -> Result<RouteTable, ChatError> {
        let guard = self.inner.read().await;
        guard
            .get(session_id)
            .map(|s| s.routes.clone())
            .ok_or_else(|| ChatError::SessionNotFound(session_id.to_string()))
    }

    pub async fn find_action(
        &self,
        session_id: &str,
        message_id: u64,
        index: usize,
    ) -> Result<QuickAction, ChatError> {
        let guard = self.inner.read().await;
        let session = guard
            .get(session_id)
            .ok_or_else(|| ChatError::SessionNotFound(session_id.to_string()))?;
        let message = session
            .log
            .get(message_id)
            .ok_or(ChatError::MessageNotFound(message_id))?;
        message
            .actions
            .get(index)
            .cloned()
            .ok_or(ChatError::ActionNotFound { message_id, index })
    }

    /// Get a copy of the session history
    pub async fn get_history(&self, session_id: &str) -> Option<Vec<Message>> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(|s| s.log.as_slice().to_vec())
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

    async fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, ChatError> {
        let mut guard = self.inner.write().await;
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| ChatError::SessionNotFound(session_id.to_string()))?;
        session.last_active = Instant::now();
        Ok(f(session))
    }
}
