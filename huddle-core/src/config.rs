//! Huddle configuration.
//!
//! The remote store's URL and API key come from
//! `~/.config/huddle/config.toml`, overridable with `HUDDLE_STORE_URL`
//! and `HUDDLE_API_KEY` environment variables. With neither present the
//! client cannot reach the store at all, which is reported as the same
//! "setup required" condition as a missing remote schema.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{HuddleError, HuddleResult};

/// Connection settings for the remote store.
#[derive(Debug, Clone, Deserialize)]
pub struct HuddleConfig {
    pub store_url: String,
    pub api_key: String,
}

impl HuddleConfig {
    pub fn config_path() -> HuddleResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HuddleError::Config("Could not determine config directory".into()))?
            .join("huddle");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration, layering the config file under env overrides.
    pub fn load() -> HuddleResult<Self> {
        let config_path = Self::config_path()?;

        let config = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("HUDDLE"))
            .build()
            .map_err(|e| HuddleError::Config(e.to_string()))?;

        // Missing keys mean the user never pointed us at a store.
        config
            .try_deserialize()
            .map_err(|_| HuddleError::SetupRequired)
    }
}
