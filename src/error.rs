use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors raised by the chat widget operations.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("chat widget is closed")]
    WidgetClosed,

    #[error("message not found: {0}")]
    MessageNotFound(u64),

    #[error("message {message_id} has no action at index {index}")]
    ActionNotFound { message_id: u64, index: usize },

    #[error("action is a navigation link, not a follow-up")]
    NotAFollowUp,

    #[error("reply task failed: {0}")]
    ReplyTask(#[from] tokio::task::JoinError),
}

/// Form validation failures. The display text is shown to the visitor as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter your full name (at least 2 characters)")]
    NameTooShort,

    #[error("Please enter a valid phone number (at least 10 digits)")]
    InvalidPhone,

    #[error("Please select your country")]
    MissingCountry,

    #[error("Password must be at least 8 characters long!")]
    PasswordTooShort,

    #[error("Please fill in the required field: {0}")]
    MissingField(&'static str),

    #[error("Check-out must be after check-in")]
    CheckoutBeforeCheckin,

    #[error("Check-in cannot be in the past")]
    CheckinInPast,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::SessionNotFound(_) | ChatError::MessageNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ChatError::WidgetClosed
            | ChatError::ActionNotFound { .. }
            | ChatError::NotAFollowUp => AppError::BadRequest(err.to_string()),
            ChatError::ReplyTask(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };

        if let AppError::Internal(msg) = &self {
            tracing::error!(error = %msg, "request failed");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
