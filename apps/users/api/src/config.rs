//! Configuration for Users API

use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?; // Required - will fail if JWT_SECRET is not set

        Ok(Self {
            app: app_info!(),
            server,
            jwt,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "config-test-secret-with-32-characters";

    #[test]
    fn test_from_env_reads_all_sections() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                ("PORT", Some("3000")),
                ("JWT_SECRET", Some(SECRET)),
                ("JWT_TTL_SECONDS", Some("60")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.environment.is_production());
                assert_eq!(config.server.port, 3000);
                assert_eq!(config.jwt.ttl_seconds, 60);
                assert_eq!(config.app.name, "users_api");
            },
        );
    }

    #[test]
    fn test_from_env_requires_jwt_secret() {
        temp_env::with_var_unset("JWT_SECRET", || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_from_env_rejects_short_jwt_secret() {
        temp_env::with_var("JWT_SECRET", Some("too-short"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
