use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SerialError};

/// Canonical digit width of a serial's numeric segment.
pub const DEFAULT_WIDTH: usize = 6;

/// Largest number of serials a single range may expand to.
pub const DEFAULT_MAX_EXPANSION: u64 = 10_000;

/// Most digits a numeric segment can hold without overflowing `u64`.
pub const MAX_WIDTH: usize = 19;

pub const CONFIG_FILE_NAME: &str = "serial-range.json";

/// Engine tunables, loadable from a JSON file.
///
/// Missing fields fall back to [`DEFAULT_WIDTH`] and [`DEFAULT_MAX_EXPANSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canonical_width: usize,
    pub max_expansion: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canonical_width: DEFAULT_WIDTH,
            max_expansion: DEFAULT_MAX_EXPANSION,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Load from [`default_config_path`] if that file exists, otherwise
    /// return the defaults.
    pub fn load_or_default() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            Self::from_json_file(&path)
        } else {
            debug!(path = %path.display(), "no engine config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.canonical_width == 0 || self.canonical_width > MAX_WIDTH {
            return Err(SerialError::InvalidArgument(format!(
                "canonical_width must be between 1 and {}, got {}",
                MAX_WIDTH, self.canonical_width
            )));
        }
        if self.max_expansion == 0 {
            return Err(SerialError::InvalidArgument(
                "max_expansion must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        dir.join("serial-range").join(CONFIG_FILE_NAME)
    } else {
        PathBuf::from(format!(".{}", CONFIG_FILE_NAME))
    }
}
