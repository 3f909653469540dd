//! Application state management.
//!
//! Holds the token authority shared by the issuing side (login) and the
//! verifying side (bearer middleware).

use axum_helpers::JwtAuth;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub jwt_auth: JwtAuth,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            jwt_auth: JwtAuth::new(&config.jwt),
        }
    }
}
