//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use supp_core::{EngineConfig, Locale, ScanStrategy};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Language for weekday labels (`en` or `zh-TW`).
    #[serde(default)]
    pub locale: Locale,

    /// How the stats engine gathers per-day counts (`batched` or `per-day`).
    #[serde(default)]
    pub scan: ScanStrategy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("locale", &self.locale)
            .field("scan", &self.scan)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("supp.db"),
            locale: Locale::default(),
            scan: ScanStrategy::default(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

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

        // Load from environment variables (SUPP_*)
        figment = figment.merge(Env::prefixed("SUPP_"));

        figment.extract()
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            scan: self.scan,
            locale: self.locale,
            ..EngineConfig::default()
        }
    }
}

/// Returns the platform-specific config directory for supp.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("supp"))
}

/// Returns the platform-specific data directory for supp.
///
/// On Linux: `~/.local/share/supp`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("supp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_dirs_data_path_ends_with_supp() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "supp");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("supp.db"));
        assert_eq!(config.locale, Locale::English);
        assert_eq!(config.scan, ScanStrategy::Batched);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "database_path = \"/tmp/custom.db\"\nlocale = \"zh-TW\"\nscan = \"per-day\""
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.locale, Locale::TraditionalChinese);
        assert_eq!(config.scan, ScanStrategy::PerDay);

        let engine = config.engine_config();
        assert_eq!(engine.scan, ScanStrategy::PerDay);
        assert_eq!(engine.locale, Locale::TraditionalChinese);
        assert_eq!(engine.missed_window_days, 14);
    }

    #[test]
    fn test_debug_lists_fields() {
        let config = Config {
            database_path: PathBuf::from("/data/supp.db"),
            locale: Locale::English,
            scan: ScanStrategy::Batched,
        };
        assert_eq!(
            format!("{config:?}"),
            "Config { database_path: \"/data/supp.db\", locale: English, scan: Batched }"
        );
    }
}
