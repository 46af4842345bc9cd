//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the submission cache database.
    pub database_path: PathBuf,

    /// Default judge handle used when a command does not pass `--handle`.
    ///
    /// The handle is plain configuration, never remembered implicitly:
    /// commands resolve it explicitly and fail with a hint when it is
    /// missing here too.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("handle", &self.handle)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("grind.db"),
            handle: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (GRIND_*)
        figment = figment.merge(Env::prefixed("GRIND_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for grind.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("grind"))
}

/// Returns the platform-specific data directory for grind.
///
/// On Linux: `~/.local/share/grind`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("grind"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("grind.db"));
        assert!(config.handle.is_none());
    }

    #[test]
    fn dirs_data_path_ends_with_grind() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "grind");
    }
}
