//! Configuration for the task server and the console client.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. `config.json` in the platform data directory (see [`DataStorage`]),
//!    or built-in defaults when the file does not exist.
//! 2. Environment variables, including a `.env` file loaded at start-up:
//!    `TUDU_BIND`, `TUDU_DATABASE`, `TUDU_SEED`, `TUDU_API_URL`.
//! 3. Command-line flags, applied by the individual commands.
//!
//! ```ignore
//! use tudu::libs::config::Config;
//!
//! let config = Config::read()?.with_env_overrides();
//! println!("API: {}", config.client.api_url);
//! ```

use super::app_info;
use super::data_storage::DataStorage;
use super::task::truthy;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Database file created in the data directory when none is configured.
pub const DEFAULT_DATABASE_FILE: &str = "tudu.db";

/// Location value that selects a transient in-memory database.
pub const MEMORY_DATABASE: &str = ":memory:";

pub const DEFAULT_BIND: &str = "127.0.0.1:3001";

/// Settings for `tudu serve`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    pub bind: String,

    /// Database file path or `:memory:`. Unset means the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Insert the sample tasks into a freshly created database.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            database: None,
            seed: true,
        }
    }
}

impl ServerConfig {
    /// Resolves the database location, falling back to `tudu.db` in the
    /// data directory.
    pub fn database_location(&self) -> Result<String> {
        match &self.database {
            Some(location) => Ok(location.clone()),
            None => {
                let path = DataStorage::new().get_path(DEFAULT_DATABASE_FILE)?;
                Ok(path.to_string_lossy().into_owned())
            }
        }
    }
}

/// Settings for the console client commands.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: app_info::default_api_url().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
}

impl Config {
    /// Reads `config.json` from the data directory.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads a configuration file. A missing file yields the defaults.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| Message::ConfigParseError(path.display().to_string()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Applies `TUDU_*` variables from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(bind) = lookup("TUDU_BIND") {
            self.server.bind = bind;
        }
        if let Some(database) = lookup("TUDU_DATABASE") {
            self.server.database = Some(database);
        }
        if let Some(seed) = lookup("TUDU_SEED") {
            self.server.seed = truthy(&Value::String(seed));
        }
        if let Some(api_url) = lookup("TUDU_API_URL") {
            self.client.api_url = api_url;
        }

        self
    }

    /// Interactive setup wizard seeded with the current configuration.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();

        msg_print!(format!("{} {}", app_info::name(), app_info::version()), true);

        let bind: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptServerBind.to_string())
            .default(current.server.bind.clone())
            .interact_text()?;

        let database: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(current.server.database.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        let seed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSeedSamples.to_string())
            .default(current.server.seed)
            .interact()?;

        let api_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptApiUrl.to_string())
            .default(current.client.api_url.clone())
            .interact_text()?;

        Ok(Config {
            server: ServerConfig {
                bind: bind.trim().to_string(),
                database: Some(database.trim().to_string()).filter(|d| !d.is_empty()),
                seed,
            },
            client: ClientConfig {
                api_url: api_url.trim().to_string(),
            },
        })
    }
}
