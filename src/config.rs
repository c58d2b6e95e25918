/// Application configuration
///
/// Loaded from a JSON file (`gallery.config.json` by default). Every field
/// has a default so a partial file, or no file at all, still yields a
/// usable configuration.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "gallery.config.json";

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "GALLERY_CONFIG";

/// Log level setting for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the log crate's level filter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// A social network entry shown in the link bar and on the bio page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Network name (e.g., "instagram")
    pub name: String,
    /// Account handle displayed on the bio page
    pub handle: String,
    /// Profile URL opened in the system browser
    pub url: String,
}

impl SocialLink {
    fn new(name: &str, handle: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            handle: handle.to_string(),
            url: url.to_string(),
        }
    }
}

/// All user-facing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Site title shown in the header
    pub title: String,
    pub log_level: LogLevel,
    /// Folder synced into the catalog at startup
    pub portfolio_dir: Option<PathBuf>,
    /// Catalog database location (defaults to the user data directory)
    pub catalog_path: Option<PathBuf>,
    /// Image shown above the title in the header
    pub logo_path: Option<PathBuf>,
    /// Text of the bio page
    pub bio: String,
    /// Route shown at startup when none is given on the command line
    pub start_route: String,
    /// Window width (logical pixels) below which the layout is compact
    pub compact_breakpoint: f32,
    pub social: Vec<SocialLink>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Skylerie".to_string(),
            log_level: LogLevel::default(),
            portfolio_dir: None,
            catalog_path: None,
            logo_path: None,
            bio: String::new(),
            start_route: String::new(),
            compact_breakpoint: 900.0,
            social: vec![
                SocialLink::new("twitter", "Skyleriearts", "https://twitter.com/Skyleriearts"),
                SocialLink::new("instagram", "Skyleriie", "https://www.instagram.com/skyleriie/"),
                SocialLink::new("telegram", "SkylerieArt", "https://t.me/skylerie"),
                SocialLink::new("patreon", "skylerie", "https://www.patreon.com/skylerie"),
            ],
        }
    }
}

impl AppConfig {
    /// Resolve the configuration file path from the environment
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load the configuration from `path`
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No configuration at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(GalleryError::io(path, err)),
        };

        serde_json::from_str(&contents).map_err(|source| GalleryError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| GalleryError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|err| GalleryError::io(path, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.config.json");
        std::fs::write(&path, r#"{ "title": "Studio", "log_level": "debug" }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.title, "Studio");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.compact_breakpoint, 900.0);
        assert_eq!(config.social.len(), 4);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, GalleryError::Config { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.config.json");

        let mut config = AppConfig::default();
        config.portfolio_dir = Some(PathBuf::from("/srv/art"));
        config.social.truncate(1);
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
    }
}
