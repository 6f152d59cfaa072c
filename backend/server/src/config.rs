use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use catalog::remote::{MEALDB_URL, SPOONACULAR_URL};
use thiserror::Error;
use tracing::{info, warn};

const SPOONACULAR_KEY: &str = "SPOONACULAR_KEY";

#[derive(Error, Debug)]
#[error("Invalid {key} value: {message}")]
pub struct ConfigError {
    key: String,
    message: String,
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub meal_db_url: String,
    pub spoonacular_url: String,
    pub spoonacular_key: Option<String>,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", "3000")?,
            meal_db_url: try_load("MEALDB_URL", MEALDB_URL)?,
            spoonacular_url: try_load("SPOONACULAR_URL", SPOONACULAR_URL)?,
            spoonacular_key: load_secret(SPOONACULAR_KEY),
            upstream_timeout: Duration::from_secs(try_load("UPSTREAM_TIMEOUT_SECS", "10")?),
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Environment first, then the docker secret file.
fn load_secret(secret_name: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_name) {
        return Some(value);
    }

    let path = format!("/run/secrets/{secret_name}");

    match read_to_string(&path).map(|s| s.trim().to_string()) {
        Ok(secret) if !secret.is_empty() => Some(secret),
        Ok(_) => {
            warn!("{secret_name} not in environment and {path} is empty, leaving it unset");
            None
        }
        Err(e) => {
            warn!("{secret_name} not in environment and {path} unreadable ({e}), leaving it unset");
            None
        }
    }
}
