//! Mapper configuration file
//!
//! ```yaml
//! database:
//!   username: pdns
//!   password: secret
//!   address: 127.0.0.1:3306
//!   name: pdns
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SyncError;

/// SQL dialect of the PowerDNS database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    #[default]
    Mysql,
    Postgres,
    Sqlite,
}

impl DatabaseDriver {
    fn scheme(&self) -> &'static str {
        match self {
            DatabaseDriver::Mysql => "mysql",
            DatabaseDriver::Postgres => "postgres",
            DatabaseDriver::Sqlite => "sqlite",
        }
    }
}

/// Connection settings for the PowerDNS database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub driver: DatabaseDriver,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// host:port
    #[serde(default)]
    pub address: String,

    /// Database name
    #[serde(default)]
    pub name: String,

    /// Full connection URL; when set, the other fields are ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl DatabaseConfig {
    /// Connection URL understood by sea-orm
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        format!(
            "{}://{}:{}@{}/{}",
            self.driver.scheme(),
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
            self.address,
            self.name
        )
    }

    fn validate(&self) -> Result<(), SyncError> {
        if self.url.as_deref().is_some_and(|url| !url.is_empty()) {
            return Ok(());
        }

        let required = [
            ("database.username", &self.username),
            ("database.password", &self.password),
            ("database.address", &self.address),
            ("database.name", &self.name),
        ];

        match required.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(missing_parameter(name)),
            None => Ok(()),
        }
    }
}

/// Configuration consumed by the relational mapper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapperConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl MapperConfig {
    /// Parse and validate a configuration document
    pub fn from_yaml(yaml: &str) -> Result<Self, SyncError> {
        let config: MapperConfig = serde_yaml::from_str(yaml)?;
        config.database.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, SyncError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }
}

fn missing_parameter(name: &str) -> SyncError {
    SyncError::Config(format!("Missing required config parameter \"{}\".", name))
}
