use std::env;

use crate::ai::config::AiConfig;
use crate::server::DEFAULT_MAX_BODY_BYTES;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub max_body_bytes: usize,
    pub ai: Option<AiConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let max_body_bytes = env::var("MAX_BODY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);
        let ai = AiConfig::from_env();
        Self {
            port,
            max_body_bytes,
            ai,
        }
    }
}
