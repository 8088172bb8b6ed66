// Bulletin Admin - Rust client core for the Bulletin Board administration panel
// Copyright (C) 2025 Bulletin Board Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration
//!
//! Layered as built-in defaults, then `config.toml` in the user config
//! directory, then `BULLETIN_ADMIN__SECTION__KEY` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::TimestampStyle;

/// Environment variable prefix
const ENV_PREFIX: &str = "BULLETIN_ADMIN";

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Root URL of the bulletin board backend
    pub base_url: String,
    /// Value of the backend `sessionid` cookie
    pub session_id: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            session_id: None,
        }
    }
}

/// CSV export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Where exported post lists are written
    pub download_dir: PathBuf,
    /// Stamp file names without zero padding, as older exports were named
    pub legacy_timestamp: bool,
}

impl ExportConfig {
    pub fn timestamp_style(&self) -> TimestampStyle {
        if self.legacy_timestamp {
            TimestampStyle::Legacy
        } else {
            TimestampStyle::Padded
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            legacy_timestamp: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Maximum level: trace, debug, info, warn or error
    pub level: String,
    pub console: bool,
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            file: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load from the default config file and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load from `path` (if it exists) and the environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&AppConfig::default())
            .context("Failed to build default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }
}

/// `<config dir>/bulletin-admin/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bulletin-admin").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(Some(&dir.path().join("absent.toml"))).unwrap();

        assert_eq!(config.server.base_url, "http://127.0.0.1:8000");
        assert!(config.server.session_id.is_none());
        assert_eq!(config.export.timestamp_style(), TimestampStyle::Padded);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
base_url = "https://board.example.com"
session_id = "s3ss10n"

[export]
download_dir = "/tmp/exports"
legacy_timestamp = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path())).unwrap();

        assert_eq!(config.server.base_url, "https://board.example.com");
        assert_eq!(config.server.session_id.as_deref(), Some("s3ss10n"));
        assert_eq!(config.export.download_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.export.timestamp_style(), TimestampStyle::Legacy);
        assert!(config.logging.console);
    }
}
