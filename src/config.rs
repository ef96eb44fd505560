use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Runtime configuration, read once at startup.
///
/// Every knob has a default so the server starts with no environment at
/// all: `DATABASE_URL` falls back to `sqlite:mocktest.db` and
/// `SERVER_ADDRESS` to `0.0.0.0:5000`.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:5000"),
            database_url: get_env_or("DATABASE_URL", "sqlite:mocktest.db"),
        })
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
