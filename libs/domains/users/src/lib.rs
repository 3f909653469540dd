//! Users Domain
//!
//! User registration, email/password login issuing a bearer token, and a
//! token-protected user listing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, bearer middleware on GET /users
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, uniqueness, hashing, token issuing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌──────────────────────────────┐
//! │ Repository  │     │ CredentialHasher, TokenIssuer │
//! └──────┬──────┘     └──────────────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, public view, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, Argon2Hasher, InMemoryUserRepository, UserService};
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-development-secret-of-32-chars!!"));
//! let service = UserService::new(InMemoryUserRepository::new(), Argon2Hasher, auth.clone());
//!
//! let router = axum::Router::new().nest("/users", handlers::router(service, auth));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use error::{UserError, UserResult};
pub use handlers::UsersApiDoc;
pub use models::{CreateUser, LoginRequest, SessionToken, User, UserResponse};
pub use password::{Argon2Hasher, CredentialHasher};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use token::TokenIssuer;
