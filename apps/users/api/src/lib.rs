//! Users API - REST server for user registration and login
//!
//! The binary in `main.rs` loads [`Config`] from the environment and serves
//! [`build_app`]; integration tests drive the same router in-process.

use axum::Router;
use axum_helpers::{create_router, health_router};

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

pub use config::Config;
pub use state::AppState;

/// Assembles the full application router.
///
/// - `/users` routes (create, login, bearer-protected list)
/// - Swagger UI and the OpenAPI document
/// - `/health` liveness endpoint
///
/// The user store lives inside the returned router; every call starts empty.
pub fn build_app(config: &Config) -> eyre::Result<Router> {
    let state = AppState::new(config);

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, &config.server)?;

    Ok(router.merge(health_router(config.app)))
}
