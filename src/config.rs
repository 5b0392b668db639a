//! jobcard configuration.
//!
//! Loaded from `<base>/config.toml`, where the base directory is
//! `JOBCARD_HOME` if set, otherwise `~/.jobcard/`. A missing file means
//! defaults: technician role, drafts stored in the base directory.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use tracing::debug;

use crate::model::{self, Role};

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "JOBCARD_HOME";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unknown technician '{id}' in {}", path.display())]
    UnknownTechnician { path: PathBuf, id: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Where drafts are stored. Defaults to the base directory.
    pub data_dir: Option<PathBuf>,

    /// Role used to gate commands.
    pub role: Role,

    /// Default first technician for new job cards.
    pub technician: Option<String>,
}

impl Config {
    /// Loads the config file, falling back to defaults if it doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(id) = &config.technician
            && model::technician(id).is_none()
        {
            return Err(ConfigError::UnknownTechnician {
                path: path.to_path_buf(),
                id: id.clone(),
            });
        }

        debug!(path = %path.display(), role = %config.role, "loaded config");
        Ok(config)
    }

    /// The config file path: `<base>/config.toml`.
    pub fn path() -> Option<PathBuf> {
        base_dir().map(|b| b.join("config.toml"))
    }

    /// Where drafts are stored: `data-dir` if configured, else the base directory.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(base_dir)
    }
}

/// The base directory: `JOBCARD_HOME`, or `~/.jobcard/`.
fn base_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var(HOME_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|h| h.join(".jobcard"))
}
