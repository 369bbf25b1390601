// File: brb-core/src/config.rs
//
// Settings come from three places, lowest precedence first:
//   1) a YAML file (default `~/.brb.yaml`)
//   2) environment variables named after the upper-cased key (`TWITCHCLIENTID`)
//   3) the `--message` flag, applied by the binary
//
// Everything is flattened into one string map first, then read into typed
// `Settings` which the rest of the program receives explicitly.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use serde_yml::Value;
use tracing::{debug, info, warn};
use crate::Error;

pub const TWITCH_CLIENT_ID: &str = "twitchclientid";
pub const TWITCH_CLIENT_SECRET: &str = "twitchclientsecret";
pub const TWITCH_APP_ACCESS_TOKEN: &str = "twitchappaccesstoken";
pub const TWITCH_USER_ID: &str = "twitchuserid";
pub const TWITTER_BEARER_TOKEN: &str = "twitterbearertoken";
pub const TWITTER_USERNAME: &str = "twitterusername";
pub const MESSAGE: &str = "message";

pub const KNOWN_KEYS: [&str; 7] = [
    TWITCH_CLIENT_ID,
    TWITCH_CLIENT_SECRET,
    TWITCH_APP_ACCESS_TOKEN,
    TWITCH_USER_ID,
    TWITTER_BEARER_TOKEN,
    TWITTER_USERNAME,
    MESSAGE,
];

pub const CONFIG_FILE_NAME: &str = ".brb.yaml";

/// Flat, case-insensitive key/value view over every config source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    values: BTreeMap<String, String>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML document whose top level is a mapping of scalars.
    /// An empty document is an empty config.
    pub fn from_yaml_str(data: &str) -> Result<Self, Error> {
        if data.trim().is_empty() {
            return Ok(Self::new());
        }
        let doc: Value = serde_yml::from_str(data)
            .map_err(|e| Error::ConfigRead(format!("invalid YAML: {e}")))?;

        let mapping = match doc {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(m) => m,
            _ => {
                return Err(Error::ConfigRead(
                    "top level of the config file must be a mapping".into(),
                ));
            }
        };

        let mut map = Self::new();
        for (key, value) in mapping.iter() {
            let Some(key) = scalar_to_string(key) else {
                warn!("Skipping config entry with a non-scalar key");
                continue;
            };
            match scalar_to_string(value) {
                Some(v) => map.set(&key, v),
                None => warn!("Skipping config key '{}': nested values are not supported", key),
            }
        }
        Ok(map)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let data = fs::read_to_string(path)
            .map_err(|e| Error::ConfigRead(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&data)
            .map_err(|e| match e {
                Error::ConfigRead(msg) => Error::ConfigRead(format!("{}: {msg}", path.display())),
                other => other,
            })
    }

    /// Overrides known keys from the environment. `lookup` is usually
    /// `|name| std::env::var(name).ok()`; empty variables are ignored.
    pub fn merge_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in KNOWN_KEYS {
            if let Some(value) = lookup(&key.to_uppercase()).filter(|v| !v.is_empty()) {
                debug!("Config key '{}' taken from the environment", key);
                self.set(key, value);
            }
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_lowercase(), value.into());
    }

    /// Missing keys read as the empty string, the same as an unset credential.
    pub fn get(&self, key: &str) -> &str {
        self.values
            .get(&key.to_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        _ => None,
    }
}

/// `$HOME/.brb.yaml`, if a home directory can be found.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Reads the config file. An explicit path must exist; the default path is
/// optional and a missing file there just means "environment only".
pub fn load_config_file(explicit: Option<&Path>) -> Result<ConfigMap, Error> {
    if let Some(path) = explicit {
        info!("Using config file {}", path.display());
        return ConfigMap::from_file(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Using config file {}", path.display());
            ConfigMap::from_file(&path)
        }
        Some(path) => {
            debug!("No config file at {}; using environment only", path.display());
            Ok(ConfigMap::new())
        }
        None => {
            debug!("No home directory; using environment only");
            Ok(ConfigMap::new())
        }
    }
}

/// Loads `.env` into the process environment, reads the config file, then
/// lets non-empty environment variables override it.
pub fn load(explicit: Option<&Path>) -> Result<ConfigMap, Error> {
    if let Ok(path) = dotenv::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }
    let mut config = load_config_file(explicit)?;
    config.merge_env(|name| std::env::var(name).ok());
    Ok(config)
}

/// Twitch app credentials. All four must be set for it to be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwitchCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub app_access_token: String,
    pub user_id: String,
}

impl TwitchCredentials {
    pub fn is_enabled(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.app_access_token.is_empty()
            && !self.user_id.is_empty()
    }
}

/// Twitter API credentials. Both must be set for it to be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwitterCredentials {
    pub bearer_token: String,
    pub username: String,
}

impl TwitterCredentials {
    pub fn is_enabled(&self) -> bool {
        !self.bearer_token.is_empty() && !self.username.is_empty()
    }
}

/// Everything the run needs from configuration, resolved once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub twitch: TwitchCredentials,
    pub twitter: TwitterCredentials,
    /// Template from the config file, if any. The `--message` flag wins over it.
    pub message: Option<String>,
}

impl Settings {
    pub fn from_config(config: &ConfigMap) -> Self {
        let message = Some(config.get(MESSAGE))
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Self {
            twitch: TwitchCredentials {
                client_id: config.get(TWITCH_CLIENT_ID).to_string(),
                client_secret: config.get(TWITCH_CLIENT_SECRET).to_string(),
                app_access_token: config.get(TWITCH_APP_ACCESS_TOKEN).to_string(),
                user_id: config.get(TWITCH_USER_ID).to_string(),
            },
            twitter: TwitterCredentials {
                bearer_token: config.get(TWITTER_BEARER_TOKEN).to_string(),
                username: config.get(TWITTER_USERNAME).to_string(),
            },
            message,
        }
    }
}
