//! Application configuration.
//!
//! Read from `<config dir>/config.json` when the file exists, then overridden by
//! command-line flags or their `NAVPANEL_*` environment variables. Every field
//! has a default, so an absent file or a partial one is fine.

use std::fs;
use std::path::{Path, PathBuf};

use clap::builder::BoolishValueParser;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::platform;
use crate::services::api_client::DEFAULT_API_BASE_URL;
use crate::services::icon_upload::IconTransport;
use crate::types::errors::ConfigError;

/// Default `tracing` filter when neither the config nor `RUST_LOG` names one.
pub const DEFAULT_LOG_FILTER: &str = "navpanel=info";

/// Flags shared by both binaries, layered over the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Config file to read instead of the platform default.
    #[arg(long, value_name = "FILE", env = "NAVPANEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the backend API.
    #[arg(long, value_name = "URL", env = "NAVPANEL_API_URL")]
    pub api_url: Option<String>,

    /// Directory exports are written to.
    #[arg(long, value_name = "DIR", env = "NAVPANEL_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// `tracing` filter, e.g. `navpanel=debug`.
    #[arg(long, value_name = "FILTER", env = "NAVPANEL_LOG")]
    pub log: Option<String>,

    /// Use the in-process sample backend instead of HTTP.
    #[arg(long, env = "NAVPANEL_DEMO", value_parser = BoolishValueParser::new())]
    pub demo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL every API path is appended to.
    pub api_base_url: String,
    pub icon_transport: IconTransport,
    /// Where exports are written; the platform download directory when unset.
    pub export_dir: Option<PathBuf>,
    pub log_filter: String,
    /// Run against the in-process sample backend instead of HTTP.
    pub demo: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            icon_transport: IconTransport::default(),
            export_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            demo: false,
        }
    }
}

impl AppConfig {
    /// Loads the config file (`--config`, or the platform default) and layers the
    /// flags over it.
    pub fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let path = args
            .config
            .clone()
            .unwrap_or_else(platform::get_config_file);
        let mut config = Self::from_file(&path)?;
        config.apply_args(args);
        Ok(config)
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config file: {}", e)))
    }

    /// Overrides fields with whatever was given on the command line or in the
    /// environment. Blank values are ignored; `--demo` can only switch demo mode on.
    pub fn apply_args(&mut self, args: &ConfigArgs) {
        let given = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        if let Some(url) = given(&args.api_url) {
            self.api_base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(dir) = &args.export_dir {
            self.export_dir = Some(dir.clone());
        }
        if let Some(filter) = given(&args.log) {
            self.log_filter = filter;
        }
        if args.demo {
            self.demo = true;
        }
    }

    /// The export directory, falling back to the platform download directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(platform::get_download_dir)
    }
}
