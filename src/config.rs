use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

// Longitud mínima de SESSION_SECRET, en bytes
const MIN_SECRET_LENGTH: usize = 32;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub session_secret: String,
    /// Vida de la cookie de sesión, en segundos.
    pub session_age: i64,
    pub media_root: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: try_load("DATABASE_URL", "sqlite://rango.db")?,
            port: try_load("PORT", "8000")?,
            session_secret: session_secret(var("SESSION_SECRET"))?,
            session_age: try_load("SESSION_COOKIE_AGE", "1209600")?,
            media_root: PathBuf::from(try_load::<String>("MEDIA_ROOT", "media")?),
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// Sin secreto propio no se arranca
fn session_secret(raw: Option<String>) -> Result<String, ConfigError> {
    let secret = raw.ok_or(ConfigError::Missing("SESSION_SECRET"))?;
    if secret.len() < MIN_SECRET_LENGTH {
        warn!("SESSION_SECRET too short ({} bytes)", secret.len());
        return Err(ConfigError::Invalid {
            key: "SESSION_SECRET",
            value: "<redacted>".to_string(),
            reason: format!("must be at least {MIN_SECRET_LENGTH} bytes"),
        });
    }
    Ok(secret)
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
