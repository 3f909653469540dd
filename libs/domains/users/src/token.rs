use axum_helpers::JwtAuth;

use crate::error::{UserError, UserResult};
use crate::models::{SessionToken, User};

/// Issues session tokens for authenticated users
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> UserResult<SessionToken>;
}

impl TokenIssuer for JwtAuth {
    fn issue(&self, user: &User) -> UserResult<SessionToken> {
        let issued = JwtAuth::issue(self, &user.id.to_string(), &user.email)
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(SessionToken {
            expires_at: issued.claims.expires_at(),
            token: issued.token,
            user_id: user.id,
        })
    }
}
