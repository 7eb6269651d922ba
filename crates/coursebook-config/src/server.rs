use std::env;

pub const DEFAULT_PORT: u16 = 5050;

/// Settings for the HTTP listener and the global error handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// When set, the full detail of every 500 response is written to the
    /// operator log. Off by default.
    pub enable_global_error_logging: bool,
}

impl ServerConfig {
    /// Reads `PORT` and `ENABLE_GLOBAL_ERROR_LOGGING`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            enable_global_error_logging: lookup("ENABLE_GLOBAL_ERROR_LOGGING")
                .is_some_and(|s| s.trim().eq_ignore_ascii_case("true")),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            enable_global_error_logging: false,
        }
    }
}
