use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::application::services::text_chunker::DEFAULT_CHUNK_SIZE;

pub const DEFAULT_DATABASE_URL: &str = "data/coursebook.db";
pub const DEFAULT_UPLOAD_DIR: &str = "data/uploads";
pub const DEFAULT_PORT: u16 = 5173;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub port: u16,
    pub chunk_size: usize,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub gateway_timeout_secs: u64,
    pub youtube_api_key: Option<String>,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Reads the process environment. Unset or unparsable values fall back to
    /// their defaults; blank API keys count as unset.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            upload_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            ),
            port: parse_var("PORT", DEFAULT_PORT),
            chunk_size: parse_var("CHUNK_SIZE", DEFAULT_CHUNK_SIZE),
            openai_api_key: secret_var("OPENAI_API_KEY"),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            gateway_timeout_secs: parse_var("GATEWAY_TIMEOUT_SECS", DEFAULT_GATEWAY_TIMEOUT_SECS),
            youtube_api_key: secret_var("YOUTUBE_API_KEY"),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            port: DEFAULT_PORT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            gateway_timeout_secs: DEFAULT_GATEWAY_TIMEOUT_SECS,
            youtube_api_key: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}

fn secret_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
