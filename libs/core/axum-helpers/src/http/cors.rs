use axum::http::{HeaderName, HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Response header carrying the authenticated user's id after login.
pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("userid");

/// Creates a CORS layer for the given origins.
///
/// - GET, POST, OPTIONS
/// - Content-Type, Authorization, Accept request headers
/// - Authorization and UserID exposed so browser clients can read the login response
/// - 1 hour max age
///
/// # Errors
/// Returns `InvalidInput` if any origin is not a valid header value.
pub fn create_cors_layer(origins: &[String]) -> io::Result<CorsLayer> {
    let allowed_origins = origins
        .iter()
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .expose_headers([header::AUTHORIZATION, USER_ID_HEADER])
        .max_age(Duration::from_secs(3600)))
}
