use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind host (e.g., 0.0.0.0)
    pub app_host: String,
    /// HTTP bind port (e.g., 8080)
    pub app_port: u16,

    pub gemini: GeminiConfig,
    pub vercel: VercelConfig,
}

/// Completion service settings.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL, always ending in `/` so relative joins keep the path.
    pub base_url: Url,
    /// Model name, e.g. "gemini-1.5-flash"
    pub model: String,
    pub timeout: Duration,
}

/// Hosting provider settings.
///
/// The token stays optional here; `VercelDeployer::new` is the one that
/// refuses to build without it.
#[derive(Debug, Clone)]
pub struct VercelConfig {
    pub token: Option<String>,
    pub base_url: Url,
    /// Deployment creation is slow (upload + provisioning)
    pub deploy_timeout: Duration,
    /// Identity check used by the diagnostic route
    pub verify_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_host = env_or_default(&lookup, "APP_HOST", "0.0.0.0");
        let app_port = parse_or_default::<u16, _>(&lookup, "APP_PORT", 8080)?;

        let gemini = GeminiConfig {
            api_key: non_empty(&lookup, "GOOGLE_API_KEY")
                .ok_or(ConfigError::MissingVar("GOOGLE_API_KEY"))?,
            base_url: parse_url_or_default(
                &lookup,
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com/",
            )?,
            model: env_or_default(&lookup, "GEMINI_MODEL", "gemini-1.5-flash"),
            timeout: secs_or_default(&lookup, "LLM_TIMEOUT_SECS", 30)?,
        };

        let vercel = VercelConfig {
            token: non_empty(&lookup, "VERCEL_TOKEN"),
            base_url: parse_url_or_default(
                &lookup,
                "VERCEL_API_BASE_URL",
                "https://api.vercel.com/",
            )?,
            deploy_timeout: secs_or_default(&lookup, "DEPLOY_TIMEOUT_SECS", 60)?,
            verify_timeout: secs_or_default(&lookup, "VERIFY_TIMEOUT_SECS", 10)?,
        };

        Ok(Self {
            app_host,
            app_port,
            gemini,
            vercel,
        })
    }
}

/* --------------------------- helpers --------------------------- */

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn env_or_default<F>(lookup: &F, key: &'static str, default: &'static str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_or_default<T: FromStr, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup, key) {
        Some(v) => v.trim().parse::<T>().map_err(|_| ConfigError::InvalidNumber {
            name: key,
            value: v,
        }),
        None => Ok(default),
    }
}

fn secs_or_default<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or_default::<u64, _>(lookup, key, default).map(Duration::from_secs)
}

fn parse_url_or_default<F>(
    lookup: &F,
    key: &'static str,
    default: &'static str,
) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = env_or_default(lookup, key, default);
    // Url::join drops the last segment unless the base ends with a slash
    let with_slash = if raw.ends_with('/') {
        raw.clone()
    } else {
        format!("{raw}/")
    };
    Url::parse(&with_slash).map_err(|_| ConfigError::InvalidUrl {
        name: key,
        value: raw,
    })
}
