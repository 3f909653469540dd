//! Configuration types for JWT authentication.
//!
//! Implements the `FromEnv` trait from `core_config`, following the same
//! pattern as `ServerConfig`.

use core_config::{ConfigError, FromEnv, env_or_default, env_required};

use super::jwt::{ACCESS_TOKEN_TTL, MAX_TOKEN_TTL};

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - at least 32 characters
/// - `JWT_TTL_SECONDS` (optional) - token lifetime, defaults to 15 minutes,
///   at most one year
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Lifetime of issued tokens in seconds
    pub ttl_seconds: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and the default lifetime.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_seconds: ACCESS_TOKEN_TTL,
        }
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_seconds: i64 = env_or_default("JWT_TTL_SECONDS", &ACCESS_TOKEN_TTL.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "JWT_TTL_SECONDS".to_string(),
                details: format!("{}", e),
            })?;

        if !(1..=MAX_TOKEN_TTL).contains(&ttl_seconds) {
            return Err(ConfigError::ParseError {
                key: "JWT_TTL_SECONDS".to_string(),
                details: format!(
                    "must be between 1 and {} seconds (got {})",
                    MAX_TOKEN_TTL, ttl_seconds
                ),
            });
        }

        Ok(Self {
            secret,
            ttl_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new_valid() {
        let config = JwtConfig::new(SECRET);
        assert_eq!(config.secret, SECRET);
        assert_eq!(config.ttl_seconds, ACCESS_TOKEN_TTL);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_jwt_config_from_env_valid() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_SECONDS", Some("60"))],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, SECRET);
                assert_eq!(config.ttl_seconds, 60);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_default_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_SECONDS", None)],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.ttl_seconds, ACCESS_TOKEN_TTL);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing() {
        temp_env::with_var_unset("JWT_SECRET", || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("JWT_SECRET"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_too_short() {
        temp_env::with_var("JWT_SECRET", Some("short"), || {
            let err = JwtConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("32 characters"));
        });
    }

    #[test]
    fn test_jwt_config_from_env_rejects_non_positive_ttl() {
        temp_env::with_vars(
            [("JWT_SECRET", Some(SECRET)), ("JWT_TTL_SECONDS", Some("0"))],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_TTL_SECONDS"));
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_rejects_oversized_ttl() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_TTL_SECONDS", Some("9223372036854775807")),
            ],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("JWT_TTL_SECONDS"));
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_accepts_max_ttl() {
        let max_ttl = MAX_TOKEN_TTL.to_string();
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_TTL_SECONDS", Some(max_ttl.as_str())),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.ttl_seconds, MAX_TOKEN_TTL);
            },
        );
    }
}
