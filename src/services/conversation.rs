// src/services/conversation.rs
//! Turn loop for the assistant widget: user text in, templated reply out.

use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::chatbot::{Intent, detect_intent, generate_reply};
use super::session_manager::{ActionTarget, Message, MessageBody, SessionManager};
use crate::error::ChatError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub intent: Intent,
    pub user: Message,
    pub reply: Message,
}

/// Create a session for a page view and schedule the unsolicited greeting.
pub async fn start_session(state: &AppState, page_path: &str) -> String {
    let session_id = state.sessions.create_session(page_path).await;
    schedule_greeting(state.sessions.clone(), session_id.clone(), state.timings.greeting_delay);
    session_id
}

fn schedule_greeting(sessions: SessionManager, session_id: String, delay: Duration) {
    tokio::spawn(async move {
        sleep(delay).await;
        let Ok(routes) = sessions.routes(&session_id).await else {
            return;
        };
        let reply = generate_reply(Intent::Greeting, &routes);
        if sessions.append_if_idle(&session_id, reply).await.is_some() {
            tracing::debug!(%session_id, "sent unsolicited greeting");
        }
    });
}

/// Run one turn. Blank input produces no turn and leaves the session untouched.
pub async fn submit_message(
    state: &AppState,
    session_id: &str,
    text: &str,
) -> Result<Option<TurnOutcome>, ChatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let user = state
        .sessions
        .begin_turn(session_id, MessageBody::Text(trimmed.to_string()), true)
        .await?;

    let intent = detect_intent(trimmed);
    tracing::info!(%session_id, intent = intent.as_str(), "intent detected");

    // The typing indicator; the widget stays usable meanwhile.
    let reply = reply_after(state, session_id, intent, state.timings.typing_delay).await?;
    Ok(Some(TurnOutcome { intent, user, reply }))
}

/// Replay a quick action from an earlier bot message.
pub async fn run_follow_up(
    state: &AppState,
    session_id: &str,
    message_id: u64,
    action_index: usize,
) -> Result<TurnOutcome, ChatError> {
    let action = state
        .sessions
        .find_action(session_id, message_id, action_index)
        .await?;
    let ActionTarget::FollowUp { intent } = action.target else {
        return Err(ChatError::NotAFollowUp);
    };

    let user = state
        .sessions
        .begin_turn(session_id, MessageBody::Text(action.label.clone()), false)
        .await?;
    state.metrics.increment_action(&action.label).await;

    let reply = reply_after(state, session_id, intent, state.timings.quick_action_delay).await?;
    Ok(TurnOutcome { intent, user, reply })
}

/// Deliver the reply from a detached task once `delay` has passed. Once a
/// turn has begun its reply lands even if the caller is dropped.
async fn reply_after(
    state: &AppState,
    session_id: &str,
    intent: Intent,
    delay: Duration,
) -> Result<Message, ChatError> {
    let state = state.clone();
    let session_id = session_id.to_string();
    let pending = tokio::spawn(async move {
        sleep(delay).await;
        dispatch(&state, &session_id, intent).await
    });
    pending.await?
}

async fn dispatch(state: &AppState, session_id: &str, intent: Intent) -> Result<Message, ChatError> {
    let routes = state.sessions.routes(session_id).await.inspect_err(|_| {
        tracing::debug!(%session_id, "session gone before reply, dropping it");
    })?;
    let reply = generate_reply(intent, &routes);
    let message = state.sessions.finish_turn(session_id, intent, reply).await?;
    state.metrics.increment_intent(intent).await;
    Ok(message)
}

/// Periodically drop sessions whose page was abandoned.
pub fn spawn_purge_task(sessions: SessionManager, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                tracing::info!(removed, "purged expired sessions");
            }
        }
    })
}
