//! CLI configuration
//!
//! Settings come from three places, highest precedence first: command-line
//! flags and their environment variables, the TOML config file, then
//! built-in defaults.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use occupancy_client::{DEFAULT_API_BASE, DEFAULT_TIMEOUT};
use occupancy_types::{Credential, Roster, BUILTIN_ROOMS};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

/// Contents of the config file
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Density API bearer token
    pub token: Option<String>,

    /// Density API base URL
    pub api_base: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,

    /// Monitored rooms; replaces `ROOM_IDS` pairing when non-empty
    #[serde(default)]
    pub rooms: Roster,
}

impl fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("rooms", &self.rooms)
            .finish()
    }
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(path = %config_path.display(), "loading config file");
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|source| CliError::Toml {
                    path: config_path.display().to_string(),
                    source,
                })?;
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("occupancy").join("config.toml"))
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub room_ids: Option<String>,
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Fully resolved settings for a report run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credential: Credential,
    pub roster: Roster,
    pub api_base: String,
    pub timeout: Duration,
}

impl Settings {
    /// Merge the config file with command-line overrides.
    ///
    /// Never fails: a missing token or room list shows up per room in the
    /// report instead.
    pub fn resolve(config: CliConfig, overrides: Overrides) -> Self {
        let token = overrides
            .token
            .filter(|t| !t.trim().is_empty())
            .or(config.token);
        let credential = Credential::from_optional(token);

        let roster = if config.rooms.is_empty() {
            let space_ids = parse_room_ids(overrides.room_ids.as_deref());
            if space_ids.len() != BUILTIN_ROOMS.len() {
                warn!(
                    expected = BUILTIN_ROOMS.len(),
                    got = space_ids.len(),
                    "ROOM_IDS does not match the built-in room list; unmatched entries are skipped"
                );
            }
            Roster::builtin_paired(&space_ids)
        } else {
            if overrides.room_ids.is_some() {
                debug!("config file lists rooms; ignoring ROOM_IDS");
            }
            config.rooms
        };

        let api_base = overrides
            .api_base
            .or(config.api_base)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let timeout = overrides
            .timeout_seconds
            .or(config.timeout_seconds)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            credential,
            roster,
            api_base,
            timeout,
        }
    }
}

/// Split a comma-separated identifier list.
///
/// An unset or empty value yields a single empty identifier, not an empty
/// list. Surrounding whitespace is trimmed from each entry.
pub fn parse_room_ids(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or("")
        .split(',')
        .map(|id| id.trim().to_string())
        .collect()
}
