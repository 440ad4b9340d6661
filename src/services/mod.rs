pub mod auth;
pub mod booking;
pub mod chatbot;
pub mod conversation;
pub mod metrics_manager;
pub mod navigation;
pub mod session_manager;
