mod basic;
mod zoho;

pub use basic::BasicConfig;
pub use zoho::ZohoConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Zoho CRM OAuth client and API settings (see `zoho` table in config.toml).
    #[serde(default)]
    pub zoho: ZohoConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "CRM_PULSE_";

impl Config {
    /// Builds a Figment that merges defaults, a config TOML file and `CRM_PULSE_*` env vars.
    ///
    /// Nested keys use `__` as separator, e.g. `CRM_PULSE_ZOHO__CLIENT_ID`.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration by merging defaults, `config.toml` if present and env overrides.
    ///
    /// Note: this does **not** validate the OAuth client credentials. Binaries should call
    /// [`Config::validate`] before serving.
    pub fn load() -> Self {
        Self::figment()
            .extract()
            .unwrap_or_else(|err| panic!("failed to extract configuration: {err}"))
    }

    /// Checks the fields without which the OAuth flow cannot work.
    pub fn validate(&self) -> Result<(), String> {
        if self.zoho.client_id.trim().is_empty() {
            return Err("zoho.client_id must be set and non-empty".to_string());
        }
        if self.zoho.client_secret.trim().is_empty() {
            return Err("zoho.client_secret must be set and non-empty".to_string());
        }
        Ok(())
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);
