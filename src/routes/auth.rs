use axum::{Json, extract::State};

use crate::{
    error::AppError,
    message::AuthTabRequest,
    services::auth::{
        AuthTab, LoginResult, SignInForm, SignUpForm, SocialSignIn, initial_tab, sign_in, sign_up,
        social_sign_in,
    },
    state::SharedState,
};

pub async fn signin_handler(
    State(state): State<SharedState>,
    Json(form): Json<SignInForm>,
) -> Result<Json<LoginResult>, AppError> {
    Ok(Json(sign_in(&form, state.timings.signin_latency).await?))
}

pub async fn signup_handler(
    State(state): State<SharedState>,
    Json(form): Json<SignUpForm>,
) -> Result<Json<LoginResult>, AppError> {
    Ok(Json(sign_up(&form, state.timings.signup_latency).await?))
}

pub async fn social_handler(
    State(state): State<SharedState>,
    Json(request): Json<SocialSignIn>,
) -> Json<LoginResult> {
    Json(social_sign_in(&request, state.timings.social_latency).await)
}

pub async fn tab_handler(Json(payload): Json<AuthTabRequest>) -> Json<AuthTab> {
    Json(initial_tab(&payload.url))
}
