use axum::Router;

pub mod users;

/// Creates the API routes, mounted at the root by `create_router`.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/users", users::router(state))
}
