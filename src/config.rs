use std::env;
use std::path::PathBuf;

/// AppConfig
///
/// Holds the client's entire configuration state. This struct is designed to
/// be immutable once loaded, ensuring consistency across all services that
/// read it (identity client, token store, shared-data loader).
#[derive(Clone)]
pub struct AppConfig {
    // Base URL of the platform API (identity service + shared data).
    pub api_base_url: String,
    // Filesystem path of the single well-known location where the opaque
    // session token is persisted across process restarts.
    pub token_path: PathBuf,
    // Runtime environment marker. Controls log formatting and defaults.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development
/// conveniences (localhost API defaults, pretty logs) and production-grade
/// behavior (mandatory configuration, JSON logs).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for
    /// test setup. This allows tests to instantiate the configuration without
    /// needing to set environment variables.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            token_path: PathBuf::from(".academy-session"),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the client configuration at
    /// startup. It reads all parameters from environment variables and
    /// implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current
    /// runtime environment (especially Production) is not found. This
    /// prevents the client from starting pointed at nothing.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // The token lives at one well-known path; absence of the file means
        // unauthenticated. Overridable for multi-profile development setups.
        let token_path = env::var("SESSION_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".academy-session"));

        match env {
            Env::Local => Self {
                env: Env::Local,
                // Local development defaults to the dockerized platform API.
                api_base_url: env::var("API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
                token_path,
            },
            Env::Production => Self {
                env: Env::Production,
                // Production demands an explicit API endpoint.
                api_base_url: env::var("API_BASE_URL")
                    .expect("FATAL: API_BASE_URL required in production"),
                token_path,
            },
        }
    }
}
