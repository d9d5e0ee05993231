use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Chatterbox runtime
    pub chatterbox_url: String,
    pub chatterbox_timeout: Option<Duration>,
    // Request limits
    pub max_text_chars: usize,
    pub max_reference_audio_bytes: usize,
    pub max_request_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid value {value:?} for {name}: {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            environment: Environment::Development,
            log_format: LogFormat::Pretty,
            chatterbox_url: "http://127.0.0.1:7860".to_string(),
            chatterbox_timeout: None,
            max_text_chars: 10_000,
            max_reference_audio_bytes: 10 * 1024 * 1024,
            max_request_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let config = Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            environment: env::var("ENVIRONMENT")
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })
                .unwrap_or(defaults.environment),
            log_format: env::var("LOG_FORMAT")
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })
                .unwrap_or(defaults.log_format),
            chatterbox_url: env::var("CHATTERBOX_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.chatterbox_url),
            chatterbox_timeout: match env::var("CHATTERBOX_TIMEOUT_SECS") {
                Ok(raw) => Some(Duration::from_secs(parse_value(
                    "CHATTERBOX_TIMEOUT_SECS",
                    &raw,
                )?)),
                Err(_) => defaults.chatterbox_timeout,
            },
            max_text_chars: parse_var("MAX_TEXT_CHARS", defaults.max_text_chars)?,
            max_reference_audio_bytes: parse_var(
                "MAX_REFERENCE_AUDIO_BYTES",
                defaults.max_reference_audio_bytes,
            )?,
            max_request_bytes: parse_var("MAX_REQUEST_BYTES", defaults.max_request_bytes)?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
