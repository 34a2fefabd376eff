use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,

    // Rate limiting
    pub rate_upload_per_min: u32,
    pub rate_query_per_min: u32,

    pub api_prefix: String,
}

/// Unset or malformed values fall back to the default; a bad rate
/// limit is not worth refusing to start over.
fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),

            rate_upload_per_min: env_u32("RATE_UPLOAD_PER_MIN", 30),
            rate_query_per_min: env_u32("RATE_QUERY_PER_MIN", 600),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
