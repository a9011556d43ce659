use crate::auth::context::AuthContext;
use crate::auth::token::verify_token;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Bearer-token authentication middleware for protected routes.
///
/// Fails closed: a missing header is 401, anything wrong with the token
/// itself is 403. On success the decoded claims are attached to request
/// extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::MissingToken)?
        .to_string();

    let claims = verify_token(&token, &state.config)?;

    request.extensions_mut().insert(AuthContext::from(claims));
    Ok(next.run(request).await)
}
