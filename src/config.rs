use std::env;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Where the catalog backend lives. Resolved once at startup and injected
/// into the client, so nothing else in the crate reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Config {
    /// First command-line argument wins, then `MOVIELIB_API_BASE`, then the
    /// default local backend.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(base) = env::var("MOVIELIB_API_BASE") {
            if !base.is_empty() {
                config.api_base = base;
            }
        }

        if let Some(base) = env::args().nth(1) {
            config.api_base = base;
        }

        config
    }
}
