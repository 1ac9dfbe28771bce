use crate::auth::token;
use crate::db::accounts;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Gate for protected routes
///
/// Lets the request through untouched when the `Authorization` header holds
/// a token some account currently owns. Missing, blank, unknown and cleared
/// tokens all get 403; a failing store gets 500.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(token::from_header);

    let Some(access_token) = presented else {
        tracing::debug!("Protected route hit without a token");
        return Err(AppError::Unauthenticated);
    };

    match accounts::find_by_token(&state.db, access_token).await {
        Ok(account) => {
            tracing::debug!("Authenticated request for '{}'", account.username);
            Ok(next.run(request).await)
        }
        Err(AppError::NotFound(_)) => Err(AppError::Unauthenticated),
        Err(e) => Err(e),
    }
}
