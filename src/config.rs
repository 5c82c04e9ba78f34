//! Resolution of a dataset name to the directory holding its files.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const LOCATION_FILE: &str = "dataset_location.toml";
pub const DEBUG_LOCATION_FILE: &str = "dataset_location_debug.toml";

/// Maps a dataset name and debug flag to the dataset root.
pub trait DatasetLocator {
    fn dataset_path(&self, dataset: &str, debug: bool) -> Result<PathBuf>;
}

/// Always answers with the same directory.
#[derive(Debug, Clone)]
pub struct StaticLocator(pub PathBuf);

impl DatasetLocator for StaticLocator {
    fn dataset_path(&self, _dataset: &str, _debug: bool) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub dataset_path: PathBuf,
    #[serde(default)]
    pub download_complete: bool,
}

/// Reads `dataset_location.toml` (or its debug twin) from a config directory:
///
/// ```toml
/// [fed_heart_disease]
/// dataset_path = "/data/heart"
/// download_complete = true
/// ```
#[derive(Debug, Clone)]
pub struct ConfigFileLocator {
    config_dir: PathBuf,
}

impl ConfigFileLocator {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn location_file(&self, debug: bool) -> PathBuf {
        let name = if debug {
            DEBUG_LOCATION_FILE
        } else {
            LOCATION_FILE
        };
        self.config_dir.join(name)
    }

    pub fn load(path: &Path) -> Result<HashMap<String, DatasetEntry>> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read dataset location file {}: {e}",
                path.display()
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Records where a dataset lives, keeping the other entries of the file.
    pub fn save(&self, dataset: &str, entry: DatasetEntry, debug: bool) -> Result<()> {
        let path = self.location_file(debug);
        let mut entries = if path.exists() {
            Self::load(&path)?
        } else {
            HashMap::new()
        };
        entries.insert(dataset.to_string(), entry);

        let content = toml::to_string_pretty(&entries)
            .map_err(|e| Error::Config(format!("Failed to serialize locations: {e}")))?;
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl DatasetLocator for ConfigFileLocator {
    fn dataset_path(&self, dataset: &str, debug: bool) -> Result<PathBuf> {
        let path = self.location_file(debug);
        let mut entries = Self::load(&path)?;

        let entry = entries.remove(dataset).ok_or_else(|| {
            Error::Config(format!("No entry for {dataset} in {}", path.display()))
        })?;

        if !entry.download_complete {
            return Err(Error::Config(format!(
                "Download of {dataset} is not complete, see {}",
                path.display()
            )));
        }

        if !entry.dataset_path.is_dir() {
            return Err(Error::Config(format!(
                "Dataset path {} for {dataset} does not exist",
                entry.dataset_path.display()
            )));
        }

        let is_debug = debug;
        tracing::debug!(
            dataset,
            debug_mode = is_debug,
            path = %entry.dataset_path.display(),
            "resolved dataset"
        );

        Ok(entry.dataset_path)
    }
}
