//! Application-level configuration loading: seats per match, identifier width and
//! the marker that introduces chat commands.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::{
    registry::DEFAULT_MATCH_ID_DIGITS,
    roster::{DEFAULT_CAPACITY, MAX_CAPACITY},
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PADEL_BOT_CONFIG_PATH";
/// Marker every chat command starts with.
pub const DEFAULT_COMMAND_PREFIX: char = '/';
const MAX_MATCH_ID_DIGITS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    max_players: usize,
    match_id_digits: usize,
    command_prefix: char,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        max_players = app_config.max_players,
                        match_id_digits = app_config.match_id_digits,
                        prefix = %app_config.command_prefix,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document, sanitising out-of-range values.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Seats offered by every new match.
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// Digits of freshly generated match identifiers.
    pub fn match_id_digits(&self) -> usize {
        self.match_id_digits
    }

    /// Character introducing chat commands.
    pub fn command_prefix(&self) -> char {
        self.command_prefix
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_CAPACITY,
            match_id_digits: DEFAULT_MATCH_ID_DIGITS,
            command_prefix: DEFAULT_COMMAND_PREFIX,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    max_players: Option<usize>,
    match_id_digits: Option<usize>,
    command_prefix: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();

        let max_players = match value.max_players {
            Some(0) => {
                warn!("max_players must be at least 1; using default");
                defaults.max_players
            }
            Some(seats) if seats > MAX_CAPACITY => {
                warn!(
                    max_players = seats,
                    cap = MAX_CAPACITY,
                    "max_players too large; capping"
                );
                MAX_CAPACITY
            }
            Some(seats) => seats,
            None => defaults.max_players,
        };

        let match_id_digits = value
            .match_id_digits
            .map(|digits| digits.clamp(1, MAX_MATCH_ID_DIGITS))
            .unwrap_or(defaults.match_id_digits);

        let command_prefix = match value.command_prefix.as_deref().map(parse_prefix) {
            Some(Some(prefix)) => prefix,
            Some(None) => {
                warn!("command_prefix must be a single punctuation character; using default");
                defaults.command_prefix
            }
            None => defaults.command_prefix,
        };

        Self {
            max_players,
            match_id_digits,
            command_prefix,
        }
    }
}

fn parse_prefix(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(prefix), None) if !prefix.is_alphanumeric() && !prefix.is_whitespace() => {
            Some(prefix)
        }
        _ => None,
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
