// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::chatbot::Intent;
use crate::services::session_manager::Message;

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub page_path: String,
}

#[derive(Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct VisibilityResponse {
    pub session_id: String,
    pub is_open: bool,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct ActionRequest {
    pub session_id: String,
    pub message_id: u64,
    pub action_index: usize,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub intent: Intent,
    pub user: Message,
    pub reply: Message,
}

#[derive(Deserialize)]
pub struct CardFieldsRequest {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub cvv: String,
}

#[derive(Serialize, Deserialize)]
pub struct CardFieldsResponse {
    pub card_number: String,
    pub cvv: String,
    pub expiry_years: Vec<i32>,
}

#[derive(Deserialize)]
pub struct AuthTabRequest {
    pub url: String,
}
