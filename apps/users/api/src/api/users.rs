use axum::Router;
use domain_users::{Argon2Hasher, InMemoryUserRepository, UserService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository, Argon2Hasher, state.jwt_auth.clone());
    handlers::router(service, state.jwt_auth.clone())
}
