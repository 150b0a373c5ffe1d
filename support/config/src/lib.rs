#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Glalby Configuration
//!
//! Where to find the native Greenlight Alby library and how to log.
//! Configuration is stored as TOML:
//!
//! ```toml
//! [library]
//! name = "glalby_bindings"
//! search_paths = ["/opt/glalby/lib"]
//!
//! [logging]
//! level = "info"
//! file = "glalby.log"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Configuration file was not found at the specified path
    #[error("Config file not found at: {0}")]
    NotFound(PathBuf),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Native library location
    pub library: LibraryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Native library location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Library name without platform prefix or extension, or a path to the file
    pub name: String,
    /// Directories searched for the library, in order
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (trace, debug, info, warn, error, or an `EnvFilter` directive)
    pub level: String,
    /// Log file path (optional, stderr otherwise)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string(), file: None } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load the file at [`Config::default_path`], if one exists
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        Self::from_file(path)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/glalby/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("glalby");
        Ok(config_dir.join("config.toml"))
    }

    /// Default library search paths: the working directory, then the
    /// user's local library directory
    pub fn default_search_paths() -> Vec<PathBuf> {
        Self::default_search_paths_internal(std::env::current_dir().ok(), dirs::data_local_dir())
    }

    /// Internal function for testing - allows injection of environment values
    fn default_search_paths_internal(
        current_dir: Option<PathBuf>,
        data_dir: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(current_dir) = current_dir {
            paths.push(current_dir);
        }
        if let Some(data_dir) = data_dir {
            paths.push(data_dir.join("glalby").join("lib"));
        }
        paths
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: LibraryConfig {
                name: "glalby_bindings".to_string(),
                search_paths: Self::default_search_paths(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_from_file() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let toml_content = r#"
            [library]
            name = "glalby_bindings"
            search_paths = ["/opt/glalby/lib", "vendor"]

            [logging]
            level = "debug"
            file = "glalby.log"
        "#;
        fs::write(&temp_file, toml_content)
            .expect("Failed to write TOML content to temporary file");

        let loaded =
            Config::from_file(&temp_file).expect("Failed to load config from temporary file");
        assert_eq!(loaded.library.name, "glalby_bindings");
        assert_eq!(
            loaded.library.search_paths,
            vec![PathBuf::from("/opt/glalby/lib"), PathBuf::from("vendor")]
        );
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.logging.file, Some(PathBuf::from("glalby.log")));

        // Sections and fields with defaults may be left out
        let temp_file2 = NamedTempFile::new().expect("Failed to create second temporary file");
        fs::write(&temp_file2, "[library]\nname = \"/usr/lib/libglalby_bindings.so\"\n")
            .expect("Failed to write second TOML content to temporary file");

        let minimal = Config::from_file(&temp_file2).expect("Failed to load minimal config");
        assert_eq!(minimal.library.name, "/usr/lib/libglalby_bindings.so");
        assert!(minimal.library.search_paths.is_empty());
        assert_eq!(minimal.logging, LoggingConfig::default());

        match Config::from_file("nonexistent_file.toml").expect_err("Expected error for nonexistent file")
        {
            ConfigError::FileRead(_) => {}
            other => panic!("Expected FileRead error, got {:?}", other),
        }

        let temp_file3 =
            NamedTempFile::new().expect("Failed to create temporary file for parse error test");
        fs::write(&temp_file3, "invalid toml content").expect("Failed to write invalid TOML content");
        match Config::from_file(&temp_file3).expect_err("Expected parse error for invalid TOML") {
            ConfigError::Parse(_) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_round_trip() {
        let config = Config {
            library: LibraryConfig {
                name: "glalby_bindings".to_string(),
                search_paths: vec![PathBuf::from("/opt/glalby/lib")],
            },
            logging: LoggingConfig { level: "warn".to_string(), file: None },
        };
        let temp_file =
            NamedTempFile::new().expect("Failed to create temporary file for save test");

        config.save(&temp_file).expect("Failed to save config");
        let contents = fs::read_to_string(&temp_file).expect("Failed to read saved config file");
        assert!(contents.contains("glalby_bindings"));
        assert!(contents.contains("warn"));
        assert_eq!(Config::from_file(&temp_file).expect("Failed to reload config"), config);

        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let non_existent_subdir = temp_dir.path().join("nonexistent").join("config.toml");
        match config.save(&non_existent_subdir).expect_err("Expected write error") {
            ConfigError::FileRead(_) => (),
            other => panic!("Expected FileRead error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path().expect("Failed to get default config path");
        let path_str = path.to_str().expect("Path should be valid UTF-8");
        assert!(path_str.contains("glalby"));
        assert!(path_str.ends_with("config.toml"));
    }

    #[test]
    fn test_default_search_paths_internal() {
        let paths = Config::default_search_paths_internal(
            Some(PathBuf::from("/tmp/current")),
            Some(PathBuf::from("/home/u/.local/share")),
        );
        assert_eq!(
            paths,
            vec![PathBuf::from("/tmp/current"), PathBuf::from("/home/u/.local/share/glalby/lib")]
        );

        assert!(Config::default_search_paths_internal(None, None).is_empty());
    }

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.library.name, "glalby_bindings");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, None);
    }
}
