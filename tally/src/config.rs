use crate::environment;
use crate::errors::TallyError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tally_core::CounterId;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Counters included in the summary at startup.
    pub selection: Vec<CounterId>,
    /// How long advisory messages stay on screen.
    pub message_timeout_ms: u64,
    /// Print the summary and the exported log when quitting.
    pub print_log_on_exit: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            selection: CounterId::ALL.to_vec(),
            message_timeout_ms: 3000,
            print_log_on_exit: true,
        }
    }
}

impl Config {
    fn read_file(path: &Path) -> Result<Self, TallyError> {
        let toml_str = std::fs::read_to_string(path).map_err(|source| TallyError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&toml_str).map_err(|source| TallyError::ConfigParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `path`, falling back to defaults when it is missing or invalid.
    pub fn from_path(path: &Path) -> Self {
        match Config::read_file(path) {
            Ok(conf) => {
                debug!("loaded config from {}", path.display());
                conf
            }
            Err(TallyError::ConfigRead { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!("no config at {}, using defaults", path.display());
                Config::default()
            }
            Err(err) => {
                warn!("{err}; using defaults");
                Config::default()
            }
        }
    }

    /// Load the named file from the xdg config directory.
    pub fn from_file(name: &str) -> Self {
        match environment::get_config_file(name) {
            Ok(path) => Config::from_path(&path),
            Err(err) => {
                warn!("config directory unavailable: {err:#}");
                Config::default()
            }
        }
    }
}
