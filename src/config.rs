use std::env;

/// Server configuration, read once at startup.
///
/// | Variable              | Default                  |
/// |-----------------------|--------------------------|
/// | `HOMEHAVEN_ADDR`      | `127.0.0.1:3000`         |
/// | `HOMEHAVEN_DB`        | `homehaven.sqlite3`      |
/// | `OPENAI_API_KEY`      | `""` (empty)             |
/// | `OPENAI_BASE_URL`     | `https://api.openai.com` |
/// | `OPENAI_MODEL`        | `gpt-4.1-nano`           |
/// | `OPENAI_TIMEOUT_SECS` | `30`                     |
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_path: String,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Total deadline for one gateway call, in seconds.
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4.1-nano".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = GatewayConfig::default();

        Self {
            bind_addr: env::var("HOMEHAVEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            db_path: env::var("HOMEHAVEN_DB")
                .unwrap_or_else(|_| "homehaven.sqlite3".to_string()),
            gateway: GatewayConfig {
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
                model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
                timeout_secs: env::var("OPENAI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timeout_secs),
            },
        }
    }
}
