//! Path management for kakeibo
//!
//! Provides XDG-compliant path resolution for configuration, data, and the
//! audit log.
//!
//! ## Path Resolution Order
//!
//! 1. `KAKEIBO_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/kakeibo` or `~/.config/kakeibo`
//! 3. Windows: `%APPDATA%\kakeibo`

use std::path::PathBuf;

use crate::error::KakeiboError;

/// Manages all paths used by kakeibo
#[derive(Debug, Clone)]
pub struct KakeiboPaths {
    /// Base directory for all kakeibo data
    base_dir: PathBuf,
}

impl KakeiboPaths {
    /// Create a new KakeiboPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, KakeiboError> {
        let base_dir = if let Ok(custom) = std::env::var("KAKEIBO_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create KakeiboPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/kakeibo/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/kakeibo/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the directory holding every user's data
    pub fn users_dir(&self) -> PathBuf {
        self.data_dir().join("users")
    }

    /// Get the data directory of a single user
    pub fn user_dir(&self, user: &str) -> PathBuf {
        self.users_dir().join(user)
    }

    /// Get the path to a user's transactions.json
    pub fn transactions_file(&self, user: &str) -> PathBuf {
        self.user_dir(user).join("transactions.json")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), KakeiboError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KakeiboError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.users_dir())
            .map_err(|e| KakeiboError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if kakeibo has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, KakeiboError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("kakeibo"));
    }

    let base = directories::BaseDirs::new()
        .ok_or_else(|| KakeiboError::Config("Could not determine home directory".into()))?;
    Ok(base.home_dir().join(".config").join("kakeibo"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, KakeiboError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| KakeiboError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("kakeibo"))
}
