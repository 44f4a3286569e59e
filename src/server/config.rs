/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables once at startup, with
 * development defaults when a variable is missing. Missing secrets are
 * logged but do not prevent startup.
 *
 * Variables consumed:
 * - `SERVER_PORT`          - listen port (default 3000)
 * - `FRONTEND_URL`         - allowed cross-origin client address
 * - `JWT_SECRET`           - credential signing secret
 * - `JWT_EXPIRES_IN_SECS`  - token lifetime in seconds (default 30 days)
 */

use crate::auth::AuthConfig;

/// Fallback CORS origin for local development.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Immutable server configuration, shared through `AppState`
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Origin admitted by the CORS layer.
    pub frontend_url: String,
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let frontend_url = std::env::var("FRONTEND_URL").unwrap_or_else(|_| {
            tracing::warn!("FRONTEND_URL not set, allowing {}", DEFAULT_FRONTEND_URL);
            DEFAULT_FRONTEND_URL.to_string()
        });

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using insecure development secret");
            "your-secret-key-change-in-production".to_string()
        });

        let token_ttl_secs = std::env::var("JWT_EXPIRES_IN_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Self {
            port,
            frontend_url,
            auth: AuthConfig::new(jwt_secret, token_ttl_secs),
        }
    }
}
