use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::realtime::{DEFAULT_ROOM, PLACEHOLDER_USERNAME};

/// Client configuration persisted as TOML.
///
/// Fields:
/// - api_base: base URL of the authentication API
/// - channel_url: room channel address (ws(s):// URL or an http base)
/// - room: room joined on connect
/// - username: name sent with the join request
/// - session_file: where the token and username are kept between runs
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub channel_url: String,
    pub room: String,
    pub username: String,
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base: "http://localhost:5000".into(),
            channel_url: "ws://localhost:5000/ws".into(),
            room: DEFAULT_ROOM.into(),
            username: PLACEHOLDER_USERNAME.into(),
            session_file: PathBuf::from("pokerroom-session.toml"),
        }
    }
}

impl ClientConfig {
    /// Load configuration from `path`. If the file does not exist, create it
    /// with the defaults and return them.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)
                .with_context(|| format!("reading config file '{}'", path.display()))?;
            let cfg: ClientConfig = toml::from_str(&s)
                .with_context(|| format!("parsing TOML config '{}'", path.display()))?;
            Ok(cfg)
        } else {
            let cfg = ClientConfig::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Write the config to `path`, replacing what was there.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory '{}'", parent.display()))?;
            }
        }
        let toml_text =
            toml::to_string_pretty(&self).with_context(|| "serializing config to TOML")?;
        fs::write(path, toml_text)
            .with_context(|| format!("writing config to '{}'", path.display()))?;
        Ok(())
    }

    /// Session file location. A relative path is taken relative to the
    /// directory holding the config file.
    pub fn session_path(&self, config_path: &Path) -> PathBuf {
        if self.session_file.is_absolute() {
            return self.session_file.clone();
        }
        match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(&self.session_file),
            _ => self.session_file.clone(),
        }
    }
}
