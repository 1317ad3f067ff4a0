//! Configuration-file support for selecting the temp root folder.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml_ng as serde_yaml;
use tempstream_core::{Result, TempStreamError};

/// Names the root folder under which temp files are created.
///
/// One of the three ways to pick a stream's directory; see
/// [`TempRoot::Config`](crate::TempRoot).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TempStreamConfig {
    /// Root temp folder for all streams built from this configuration
    pub root_temp_folder: PathBuf,
}

impl TempStreamConfig {
    /// Create a configuration with the given root folder.
    pub fn new(root_temp_folder: impl Into<PathBuf>) -> Self {
        Self {
            root_temp_folder: root_temp_folder.into(),
        }
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            TempStreamError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_yaml::from_str(&raw).map_err(|e| {
            TempStreamError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_yaml() {
        let config: TempStreamConfig =
            serde_yaml::from_str("root_temp_folder: /var/tmp/streams").unwrap();
        assert_eq!(config.root_temp_folder, PathBuf::from("/var/tmp/streams"));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("tempstream.yaml");
        let config = TempStreamConfig::new(dir.path().join("scratch"));
        fs::write(&config_path, serde_yaml::to_string(&config).unwrap()).unwrap();

        let loaded = TempStreamConfig::load(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = TempStreamConfig::load(Path::new("/nonexistent/tempstream.yaml"));
        assert!(matches!(result, Err(TempStreamError::Config(_))));
    }
}
