//! Configuration management

use crate::speech::VoiceSettings;
use crate::{Result, VoicegenError};
use ini::Ini;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
///
/// Settings persist in `~/.voicegen.cfg`: voice parameters passed to the
/// speech service, how exported files are named, and the UI theme.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from `path`
    ///
    /// A missing file is created with defaults. If that write fails the
    /// defaults are still used.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| VoicegenError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            if let Err(e) = default.write_to_file(&path) {
                warn!("Failed to write default config to {:?}: {}", path, e);
            }
            default
        };

        Ok(Self { ini, path })
    }

    /// In-memory defaults, not backed by a file
    pub fn defaults() -> Self {
        Self {
            ini: Self::default_config(),
            path: PathBuf::new(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| VoicegenError::Config(format!("Failed to save config: {}", e)))
    }

    /// Default config file path (~/.voicegen.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".voicegen.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("language", "de")
            .set("tld", "de")
            .set("slow", "false")
            .set("timeout_secs", "20");

        ini.with_section(Some("output"))
            .set("extension", "mp3")
            .set("file_prefix", "german_phrase");

        ini.with_section(Some("ui")).set("theme", "dark-teal");

        ini
    }

    /// Get a boolean value from config
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Language code sent to the speech service
    pub fn language(&self) -> String {
        self.get_string("speech", "language", "de")
    }

    /// Regional host of the speech service (translate.google.<tld>)
    pub fn tld(&self) -> String {
        self.get_string("speech", "tld", "de")
    }

    /// Request slower speech
    pub fn slow(&self) -> bool {
        self.get_bool("speech", "slow", false)
    }

    /// Per-request timeout; values below one second are raised to one
    pub fn request_timeout(&self) -> Duration {
        let secs = self.get_int("speech", "timeout_secs", 20).max(1);
        Duration::from_secs(secs as u64)
    }

    /// Voice parameters for every synthesis request
    pub fn voice(&self) -> VoiceSettings {
        VoiceSettings {
            language: self.language(),
            tld: self.tld(),
            slow: self.slow(),
        }
    }

    /// Extension of exported and temporary audio files, without the dot
    pub fn extension(&self) -> String {
        let ext = self.get_string("output", "extension", "mp3");
        ext.trim_start_matches('.').to_string()
    }

    /// Prefix of batch-saved file names
    pub fn file_prefix(&self) -> String {
        self.get_string("output", "file_prefix", "german_phrase")
    }

    /// Name of the UI theme
    pub fn theme_name(&self) -> String {
        self.get_string("ui", "theme", "dark-teal")
    }
}
