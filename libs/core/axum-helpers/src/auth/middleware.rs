use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// Repeated `Bearer ` prefixes are stripped too, so a client that feeds the
/// login response's `Authorization` value into its own bearer helper
/// (`Bearer Bearer <token>`) is still accepted.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut token = value.strip_prefix("Bearer ")?.trim_start();

    while let Some(rest) = token.strip_prefix("Bearer ") {
        token = rest.trim_start();
    }

    Some(token.trim()).filter(|token| !token.is_empty())
}

/// JWT authentication middleware
///
/// Rejects the request with 403 when the bearer token is missing or fails
/// signature/expiry validation. Inserts [`JwtClaims`](super::JwtClaims) into
/// request extensions on success.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::{JwtAuth, jwt_auth_middleware};
///
/// let protected = Router::new()
///     .route("/users", get(list_users))
///     .route_layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_bearer_token(request.headers()) else {
        tracing::debug!("No bearer token in Authorization header");
        return Err(AppError::Forbidden("Missing bearer token".to_string()));
    };

    let claims = auth.verify_token(token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Forbidden("Invalid or expired token".to_string())
    })?;

    tracing::debug!(user_id = %claims.sub, "Authenticated request");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
