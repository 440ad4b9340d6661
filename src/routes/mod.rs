// src/routes/mod.rs
pub mod auth;
pub mod booking;
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(static_dir: &str) -> Router<SharedState> {
    let booking_routes = Router::new()
        .route("/summary", post(booking::summary_handler))
        .route("/search", post(booking::search_handler))
        .route("/card", post(booking::card_handler))
        .route("/submit", post(booking::submit_handler));

    let auth_routes = Router::new()
        .route("/signin", post(auth::signin_handler))
        .route("/signup", post(auth::signup_handler))
        .route("/social", post(auth::social_handler))
        .route("/tab", post(auth::tab_handler));

    Router::new()
        .route("/sessions", post(chat::create_session_handler))
        .route(
            "/sessions/{id}",
            get(chat::get_session_handler).delete(chat::delete_session_handler),
        )
        .route("/sessions/{id}/open", post(chat::open_handler))
        .route("/sessions/{id}/close", post(chat::close_handler))
        .route("/sessions/{id}/toggle", post(chat::toggle_handler))
        .route("/chat", post(chat::chat_handler))
        .route("/chat/action", post(chat::action_handler))
        .nest("/booking", booking_routes)
        .nest("/auth", auth_routes)
        .route("/metrics", get(chat::get_metrics_handler))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
