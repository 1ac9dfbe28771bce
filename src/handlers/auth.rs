use crate::auth::types::{AccountSummary, CredentialsRequest};
use crate::auth::{registration, session, token};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde_json::{json, Value};

const MALFORMED_BODY: &str = "Request body must be a JSON object with username and password";

/// Unwrap a credentials body, turning extractor rejections into `on_reject`
///
/// Without this axum answers bad bodies (wrong content type, broken JSON)
/// itself, in plain text and outside the response envelope.
fn credentials_body(
    body: Result<Json<CredentialsRequest>, JsonRejection>,
    on_reject: AppError,
) -> AppResult<CredentialsRequest> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            tracing::debug!("Rejected credentials body: {}", rejection.body_text());
            Err(on_reject)
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let req = credentials_body(body, AppError::BadRequest(MALFORMED_BODY.to_string()))?;
    tracing::info!("POST /register for {:?}", req.username);

    let account = registration::register(
        &state,
        req.username.as_deref(),
        req.password.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "response": AccountSummary::from(account),
            "message": "User created successfully"
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let req = credentials_body(body, AppError::InvalidCredentials)?;
    tracing::info!("POST /login for {:?}", req.username);

    let account = session::login(&state, req.username.as_deref(), req.password.as_deref()).await?;

    Ok(Json(json!({
        "success": true,
        "response": AccountSummary::from(account),
        "message": "User logged in successfully"
    })))
}

// Protected: require_auth has already checked the token
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Json<Value>> {
    let access_token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(token::from_header)
        .ok_or(AppError::Unauthenticated)?;

    session::logout(&state, access_token).await?;

    Ok(Json(json!({
        "success": true,
        "response": null,
        "message": "User logged out successfully"
    })))
}
