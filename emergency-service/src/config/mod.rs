use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Fallback secret shipped by earlier deployments. Never accepted.
pub const KNOWN_WEAK_SECRET: &str = "default_fallback_key";

/// Minimum secret length accepted in production (HS256 key size).
pub const MIN_PROD_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub token: TokenConfig,
    /// Base of the redemption URL embedded in generated codes.
    pub public_base_url: String,
    pub seed_sample_users: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: Secret<String>,
    pub ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let environment: Environment = get_env("ENVIRONMENT", Some("dev"))?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(Config {
            common,
            environment,
            service_name: get_env("SERVICE_NAME", Some("emergency-service"))?,
            token: TokenConfig {
                secret: Secret::new(get_env("SECRET_KEY", None)?),
                ttl_minutes: get_env("TOKEN_TTL_MINUTES", Some("60"))?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "TOKEN_TTL_MINUTES is not a number: {}",
                            e
                        ))
                    })?,
            },
            public_base_url: get_env("PUBLIC_BASE_URL", Some("http://127.0.0.1:8000"))?
                .trim_end_matches('/')
                .to_string(),
            seed_sample_users: get_env("SEED_SAMPLE_USERS", Some("false"))?
                .parse()
                .map_err(|e: std::str::ParseBoolError| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "SEED_SAMPLE_USERS must be true or false: {}",
                        e
                    ))
                })?,
        })
    }

    /// Reject configurations the service must not start with.
    ///
    /// Called by `Application::build`, after logging is initialised.
    pub fn validate(&self) -> Result<(), AppError> {
        let secret = self.token.secret.expose_secret();

        if secret.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "SECRET_KEY must not be empty"
            )));
        }

        if secret == KNOWN_WEAK_SECRET {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "SECRET_KEY is set to the published fallback value; generate a real secret"
            )));
        }

        if secret.len() < MIN_PROD_SECRET_BYTES {
            if self.environment == Environment::Prod {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "SECRET_KEY must be at least {} bytes in production",
                    MIN_PROD_SECRET_BYTES
                )));
            }
            tracing::warn!(
                min_bytes = MIN_PROD_SECRET_BYTES,
                "SECRET_KEY is shorter than recommended"
            );
        }

        if self.token.ttl_minutes <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "TOKEN_TTL_MINUTES must be positive"
            )));
        }

        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "PUBLIC_BASE_URL must be an http(s) URL"
            )));
        }

        Ok(())
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}
