use axum::{Json, extract::State};
use chrono::Local;

use crate::{
    error::AppError,
    message::{CardFieldsRequest, CardFieldsResponse},
    services::booking::{
        BookingConfirmation, BookingDraft, BookingSubmission, BookingSummary, SearchSummary,
        StaySearch, expiry_years, format_card_number, sanitize_cvv, search_summary, submit_booking,
        summarize,
    },
    state::SharedState,
};

pub async fn summary_handler(Json(draft): Json<BookingDraft>) -> Json<BookingSummary> {
    Json(summarize(&draft))
}

pub async fn search_handler(Json(search): Json<StaySearch>) -> Result<Json<SearchSummary>, AppError> {
    let today = Local::now().date_naive();
    Ok(Json(search_summary(&search, today)?))
}

pub async fn card_handler(Json(payload): Json<CardFieldsRequest>) -> Json<CardFieldsResponse> {
    Json(CardFieldsResponse {
        card_number: format_card_number(&payload.card_number),
        cvv: sanitize_cvv(&payload.cvv),
        expiry_years: expiry_years(Local::now().date_naive()),
    })
}

pub async fn submit_handler(
    State(state): State<SharedState>,
    Json(submission): Json<BookingSubmission>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let today = Local::now().date_naive();
    let confirmation = submit_booking(&submission, today, state.timings.booking_latency).await?;
    Ok(Json(confirmation))
}
