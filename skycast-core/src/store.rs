use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// On-disk form of the store: a single optional key.
///
/// Example TOML:
/// last_location = "Berlin"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredInput {
    last_location: Option<String>,
}

/// Persisted-input store: remembers the last successfully resolved query
/// in a TOML file under the platform config directory.
///
/// Read once at startup to seed the prompt, written once per successful
/// resolution sequence.
#[derive(Debug, Clone)]
pub struct LocationStore {
    path: PathBuf,
}

impl LocationStore {
    /// Store at the default platform location.
    pub fn open() -> Result<Self> {
        Ok(Self {
            path: Self::store_file_path()?,
        })
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted location.
    ///
    /// Returns an empty string on first run (no file yet). An unreadable or
    /// unparseable file also yields an empty string: the value only seeds a
    /// prompt, so losing it is not worth failing startup over.
    pub fn load(&self) -> String {
        if !self.path.exists() {
            return String::new();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read location store");
                return String::new();
            }
        };

        match toml::from_str::<StoredInput>(&contents) {
            Ok(stored) => stored.last_location.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to parse location store");
                String::new()
            }
        }
    }

    /// Persist the query, creating parent directories as needed.
    pub fn remember(&self, query: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        let stored = StoredInput {
            last_location: Some(query.to_string()),
        };

        let toml =
            toml::to_string_pretty(&stored).context("Failed to serialize last location to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write store file: {}", self.path.display()))?;

        Ok(())
    }

    /// Path to the store file.
    fn store_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("last_location.toml"))
    }
}
