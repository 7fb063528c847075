use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::pipeline::ParseOptions;

const DEFAULT_MAX_DOCUMENT_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub fetch_timeout_secs: u64,
    pub max_document_bytes: usize,
    pub phone_country_code: String,
    pub reject_unsupported_formats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            fetch_timeout_secs: 30,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            phone_country_code: "+91".to_string(),
            reject_unsupported_formats: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            fetch_timeout_secs: env_or("FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?,
            max_document_bytes: env_or("MAX_DOCUMENT_BYTES", defaults.max_document_bytes)?,
            phone_country_code: std::env::var("PHONE_COUNTRY_CODE")
                .unwrap_or(defaults.phone_country_code),
            reject_unsupported_formats: match std::env::var("REJECT_UNSUPPORTED_FORMATS") {
                Ok(raw) => parse_flag(&raw).with_context(|| {
                    format!("REJECT_UNSUPPORTED_FORMATS must be true or false, got '{raw}'")
                })?,
                Err(_) => defaults.reject_unsupported_formats,
            },
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            phone_country_code: self.phone_country_code.clone(),
            reject_unsupported_formats: self.reject_unsupported_formats,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
