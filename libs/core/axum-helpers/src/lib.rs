//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: Stateless JWT issuing/verification and bearer-token middleware
//! - **[`server`]**: Router assembly, health endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Validated JSON extractor
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config)?;
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{ACCESS_TOKEN_TTL, IssuedToken, JwtAuth, JwtClaims, JwtConfig, jwt_auth_middleware};

pub use server::{HealthResponse, create_app, create_router, health_router, shutdown_signal};

pub use http::{create_cors_layer, security_headers};
pub use http::cors::USER_ID_HEADER;

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::ValidatedJson;
