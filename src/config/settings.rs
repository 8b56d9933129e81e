//! User settings for kakeibo
//!
//! Manages preferences such as the currency symbol, the default user profile
//! and calendar layout.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::KakeiboPaths;
use crate::error::KakeiboError;

/// User settings for kakeibo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol prefixed to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Profile used when `--user` is not given
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// First day of week (0 = Sunday, 1 = Monday; nothing else is accepted)
    #[serde(default = "default_first_day_of_week")]
    pub first_day_of_week: u8,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "¥".to_string()
}

fn default_user() -> String {
    "guest".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_first_day_of_week() -> u8 {
    0 // Sunday
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_user: default_user(),
            date_format: default_date_format(),
            first_day_of_week: default_first_day_of_week(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &KakeiboPaths) -> Result<Self, KakeiboError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                KakeiboError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                KakeiboError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &KakeiboPaths) -> Result<(), KakeiboError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            KakeiboError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            KakeiboError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject values that would break formatting later
    pub fn validate(&self) -> Result<(), KakeiboError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(KakeiboError::Config(format!(
                "Invalid date format '{}' in settings",
                self.date_format
            )));
        }
        if self.first_day_of_week > 1 {
            return Err(KakeiboError::Config(format!(
                "first_day_of_week must be 0 (Sunday) or 1 (Monday), got {}",
                self.first_day_of_week
            )));
        }
        Ok(())
    }

    /// Whether weeks in the calendar start on Monday
    pub fn week_starts_monday(&self) -> bool {
        self.first_day_of_week == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "¥");
        assert_eq!(settings.default_user, "guest");
        assert!(!settings.week_starts_monday());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_user = "hanako".to_string();
        settings.first_day_of_week = 1;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_user, "hanako");
        assert!(loaded.week_starts_monday());
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());

        for contents in [r#"{"date_format": "%Q"}"#, r#"{"first_day_of_week": 3}"#] {
            std::fs::write(paths.settings_file(), contents).unwrap();
            let err = Settings::load_or_create(&paths).unwrap_err();
            assert!(matches!(err, KakeiboError::Config(_)), "{}", contents);
        }

        std::fs::write(paths.settings_file(), r#"{"date_format": "%Y年%m月%d日"}"#).unwrap();
        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%Y年%m月%d日");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let loaded: Settings = serde_json::from_str(r#"{"default_user": "taro"}"#).unwrap();
        assert_eq!(loaded.default_user, "taro");
        assert_eq!(loaded.currency_symbol, "¥");
        assert_eq!(loaded.schema_version, 1);
    }
}
