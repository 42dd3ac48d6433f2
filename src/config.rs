//! Configuration management for logrecorder

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that toggles the message body in the display banner
pub const ENV_SHOW_ERRORS: &str = "LOGRECORDER_SHOW_ERRORS";
/// Environment variable that toggles persisting records to disk
pub const ENV_SAVE_ERRORS: &str = "LOGRECORDER_SAVE_ERRORS";
/// Environment variable that overrides the logs folder
pub const ENV_LOGS_FOLDER: &str = "LOGRECORDER_LOGS_FOLDER";

/// Categories of disk errors for user-friendly messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskErrorKind {
    /// Disk is full or quota exceeded
    DiskFull,
    /// Permission denied (read or write)
    PermissionDenied,
    /// File or directory not found
    NotFound,
    /// Other IO error
    Other,
}

impl DiskErrorKind {
    /// Get a user-friendly message for this error kind
    pub fn user_message(&self) -> &'static str {
        match self {
            DiskErrorKind::DiskFull => "disk full, free space needed to save logs",
            DiskErrorKind::PermissionDenied => "permission denied",
            DiskErrorKind::NotFound => "file or directory not found",
            DiskErrorKind::Other => "failed to save log",
        }
    }
}

/// Categorize an IO error into a user-friendly category
pub fn categorize_io_error(e: &std::io::Error) -> DiskErrorKind {
    use std::io::ErrorKind;

    match e.kind() {
        ErrorKind::StorageFull | ErrorKind::WriteZero => DiskErrorKind::DiskFull,
        ErrorKind::PermissionDenied => DiskErrorKind::PermissionDenied,
        ErrorKind::NotFound => DiskErrorKind::NotFound,
        _ => {
            #[cfg(unix)]
            {
                if let Some(os_error) = e.raw_os_error() {
                    // ENOSPC = 28, EDQUOT = 122 on Linux and 69 on macOS
                    if os_error == 28 || os_error == 122 || os_error == 69 {
                        return DiskErrorKind::DiskFull;
                    }
                    // EACCES
                    if os_error == 13 {
                        return DiskErrorKind::PermissionDenied;
                    }
                }
            }
            DiskErrorKind::Other
        }
    }
}

/// Create a user-friendly error message from an IO error
pub fn friendly_io_error_message(e: &std::io::Error, context: &str) -> String {
    match categorize_io_error(e) {
        DiskErrorKind::Other => format!("{}: {}", context, e),
        kind => format!("{}: {}", context, kind.user_message()),
    }
}

/// Recorder configuration
///
/// Read once when a recorder is built. There is no hot reload: a changed file or
/// environment only takes effect for recorders created afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Include the raw message in the display banner (default: false)
    #[serde(default)]
    pub show_errors: bool,

    /// Persist records to disk at all (default: true)
    #[serde(default = "default_save_errors")]
    pub save_errors: bool,

    /// Folder holding the log files (default: current working directory)
    #[serde(default = "default_logs_folder")]
    pub logs_folder: PathBuf,
}

fn default_save_errors() -> bool {
    true
}

fn default_logs_folder() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            show_errors: false,
            save_errors: default_save_errors(),
            logs_folder: default_logs_folder(),
        }
    }
}

impl LogConfig {
    /// Create a config writing into the given folder, other options at their defaults
    pub fn with_logs_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            logs_folder: folder.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the config file (if any), then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&config_file_path())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        config.logs_folder = expand_folder(&config.logs_folder.to_string_lossy());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Apply overrides from a variable lookup (normally the process environment)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_SHOW_ERRORS) {
            self.show_errors = parse_bool(&value)
                .with_context(|| format!("Invalid value for {}", ENV_SHOW_ERRORS))?;
        }
        if let Some(value) = lookup(ENV_SAVE_ERRORS) {
            self.save_errors = parse_bool(&value)
                .with_context(|| format!("Invalid value for {}", ENV_SAVE_ERRORS))?;
        }
        if let Some(value) = lookup(ENV_LOGS_FOLDER) {
            if !value.trim().is_empty() {
                self.logs_folder = expand_folder(value.trim());
            }
        }
        Ok(())
    }
}

/// Parse a boolean flag as written in environment variables
pub fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("Expected a boolean, got '{}'", other),
    }
}

fn expand_folder(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Get the base configuration directory (~/.logrecorder)
/// Falls back to ./.logrecorder if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".logrecorder")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".logrecorder"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert!(!config.show_errors);
        assert!(config.save_errors);
        assert_eq!(config.logs_folder, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = LogConfig::load_from(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let config = LogConfig {
            show_errors: true,
            save_errors: false,
            logs_folder: temp_dir.path().join("logs"),
        };
        config.save_to(&path).unwrap();

        let parsed = LogConfig::load_from(&path).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "show_errors = true\n").unwrap();

        let config = LogConfig::load_from(&path).unwrap();
        assert!(config.show_errors);
        assert!(config.save_errors);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "show_errors = \"maybe\"\n").unwrap();
        assert!(LogConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = LogConfig::default();
        config
            .apply_env(lookup_from(&[
                (ENV_SHOW_ERRORS, "yes"),
                (ENV_SAVE_ERRORS, "0"),
                (ENV_LOGS_FOLDER, "/var/log/app"),
            ]))
            .unwrap();

        assert!(config.show_errors);
        assert!(!config.save_errors);
        assert_eq!(config.logs_folder, PathBuf::from("/var/log/app"));
    }

    #[test]
    fn test_env_blank_folder_is_ignored() {
        let mut config = LogConfig::with_logs_folder("/tmp/keep");
        config
            .apply_env(lookup_from(&[(ENV_LOGS_FOLDER, "  ")]))
            .unwrap();
        assert_eq!(config.logs_folder, PathBuf::from("/tmp/keep"));
    }

    #[test]
    fn test_env_invalid_bool() {
        let mut config = LogConfig::default();
        let err = config
            .apply_env(lookup_from(&[(ENV_SHOW_ERRORS, "sometimes")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_SHOW_ERRORS));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(parse_bool(" on ").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(!parse_bool("").unwrap());
        assert!(parse_bool("2").is_err());
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".logrecorder"));
    }

    #[test]
    fn test_categorize_io_error() {
        use std::io::{Error, ErrorKind};

        let denied = Error::new(ErrorKind::PermissionDenied, "denied");
        assert_eq!(categorize_io_error(&denied), DiskErrorKind::PermissionDenied);

        let missing = Error::new(ErrorKind::NotFound, "missing");
        assert_eq!(categorize_io_error(&missing), DiskErrorKind::NotFound);

        let other = Error::new(ErrorKind::InvalidData, "weird");
        assert_eq!(categorize_io_error(&other), DiskErrorKind::Other);
        assert_eq!(
            friendly_io_error_message(&other, "Saving log"),
            "Saving log: weird"
        );
    }
}
