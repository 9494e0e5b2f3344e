//! Settings read from defaults, an optional `stringsieve.toml` (or any other
//! format the `config` crate understands) and `STRINGSIEVE__*` environment
//! variables, in increasing order of precedence.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{Result, SieveError};
use crate::persist::PersistenceMode;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub persistence: PersistenceSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceSettings {
    /// Either `memory` or `file`.
    pub mode: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub filter: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from("stringsieve")
    }

    /// `name` is a file name without extension, which need not exist.
    pub fn load_from(name: &str) -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.address", "0.0.0.0:8080")?
            .set_default("persistence.mode", "memory")?
            .set_default("persistence.path", "stringsieve.db")?
            .set_default("log.filter", "info")?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("STRINGSIEVE").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn persistence_mode(&self) -> Result<PersistenceMode> {
        match self.persistence.mode.to_lowercase().as_str() {
            "memory" | "in_memory" => Ok(PersistenceMode::InMemory),
            "file" => Ok(PersistenceMode::File(self.persistence.path.clone())),
            other => Err(SieveError::Config(format!("unknown persistence mode '{other}'"))),
        }
    }
}
