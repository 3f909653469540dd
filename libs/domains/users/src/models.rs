use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity as held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier, assigned on creation
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// User email (unique, compared case-insensitively)
    pub email: String,
    /// Argon2 PHC string; never leaves the service boundary
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user (password must already be hashed)
    pub fn new(first_name: String, last_name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            first_name,
            last_name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Public user view returned to clients (no password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub repeat_password: String,
}

/// DTO for user login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Signed, time-bounded credential issued on successful login
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}
