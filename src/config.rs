// Client settings with layered loading
//
// Precedence (lowest to highest):
// 1. Compiled defaults
// 2. Config file: `--config <path>` or `<config_dir>/actions/config.toml`
// 3. Environment variables and command line flags (`ACTIONS_URL`,
//    `ACTIONS_TOKEN_FILE`, resolved by clap)

use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::Deserialize;

use crate::error::{CliError, CliResult};
use crate::token::DEFAULT_TOKEN_FILE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Root of the actions service; endpoint paths are joined onto it.
    pub base_url: String,
    /// Where the bearer token is persisted between runs.
    pub token_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

/// File layer; `None` means "not specified, keep the lower layer".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    base_url: Option<String>,
    token_file: Option<PathBuf>,
}

/// Default location of the config file, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("actions").join("config.toml"))
}

fn load_raw_settings(path: &Path) -> CliResult<RawSettings> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| CliError::Config(format!("parse {}: {}", path.display(), e)))
}

impl Settings {
    /// Load defaults and the config file.
    ///
    /// An explicitly given file must exist; the default location is
    /// optional.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let mut current = Self::default();

        let raw = match explicit {
            Some(path) => Some(load_raw_settings(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(load_raw_settings(&path)?),
                _ => None,
            },
        };
        if let Some(raw) = raw {
            current = current.merge_with(raw);
        }

        current.base_url = normalize_base_url(&current.base_url)?;
        Ok(current)
    }

    fn merge_with(self, overlay: RawSettings) -> Self {
        Settings {
            base_url: overlay.base_url.unwrap_or(self.base_url),
            token_file: overlay.token_file.unwrap_or(self.token_file),
        }
    }

    /// Apply values from flags or the environment on top of the loaded
    /// settings.
    pub fn with_overrides(self, base_url: Option<String>, token_file: Option<PathBuf>) -> CliResult<Self> {
        let merged = self.merge_with(RawSettings { base_url, token_file });
        Ok(Settings {
            base_url: normalize_base_url(&merged.base_url)?,
            ..merged
        })
    }
}

/// Validate the URL and make sure it ends with `/` so that relative
/// endpoint paths join below it instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> CliResult<String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| CliError::Config(format!("invalid base url '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(CliError::Config(format!("invalid base url '{}'", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url.to_string())
}
