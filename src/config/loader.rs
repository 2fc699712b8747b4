//! Locating and parsing `dotlink.yaml` / `dotlink.toml`.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::ConfigError;

/// Config file names looked up in the managed root, first match wins.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["dotlink.yaml", "dotlink.yml", "dotlink.toml"];

/// File layout: settings under a `dotlink` key (`[dotlink]` in TOML), or
/// directly at the top level when that key is absent.
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    dotlink: Option<Config>,
    #[serde(flatten)]
    bare: Config,
}

impl Document {
    fn into_config(self) -> Config {
        self.dotlink.unwrap_or(self.bare)
    }
}

/// Return the first config file present in `root`.
#[must_use]
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Find the config file in `root` and parse it.
///
/// Returns the path that was loaded alongside the configuration.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no config file exists, or the error
/// from [`load_file`].
pub fn load(root: &Path) -> Result<(PathBuf, Config), ConfigError> {
    let path = find_config(root).ok_or_else(|| ConfigError::NotFound {
        dir: root.to_path_buf(),
    })?;
    let config = load_file(&path)?;
    Ok((path, config))
}

/// Parse a config file, choosing the format by extension (`.toml` is TOML,
/// anything else YAML).
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is malformed.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, &content)
}

fn parse(path: &Path, content: &str) -> Result<Config, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };
    let document: Document = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(content).map_err(|e| parse_error(e.to_string()))?
    } else {
        serde_yaml_ng::from_str(content).map_err(|e| parse_error(e.to_string()))?
    };
    Ok(document.into_config())
}
