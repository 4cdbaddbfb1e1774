use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    currency::{CurrencyCode, LocaleConfig},
    errors::TogetherError,
    format::Locale,
};

pub const DEFAULT_BUDGET: u64 = 2_000_000;
pub const DEFAULT_TREND_MONTHS: usize = 5;
pub const DEFAULT_TOP_CATEGORIES: usize = 3;
pub const DEFAULT_RECENT_TRANSACTIONS: usize = 5;

/// Reporting preferences. Missing fields fall back to their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub locale: Locale,
    pub currency: CurrencyCode,
    pub trend_months: usize,
    pub top_categories: usize,
    pub recent_transactions: usize,
    pub default_budget: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::Ko,
            currency: CurrencyCode::default(),
            trend_months: DEFAULT_TREND_MONTHS,
            top_categories: DEFAULT_TOP_CATEGORIES,
            recent_transactions: DEFAULT_RECENT_TRANSACTIONS,
            default_budget: DEFAULT_BUDGET,
            store_path: None,
        }
    }
}

impl Config {
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::new(self.locale, self.currency.clone())
    }

    /// Rejects settings that would make every report empty.
    pub fn validate(&self) -> Result<(), TogetherError> {
        if self.trend_months == 0 {
            return Err(TogetherError::InvalidInput(
                "trendMonths must be at least 1".into(),
            ));
        }
        if self.top_categories == 0 {
            return Err(TogetherError::InvalidInput(
                "topCategories must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, TogetherError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, TogetherError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, TogetherError> {
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, TogetherError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), TogetherError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_budget, 2_000_000);
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.locale = Locale::En;
        config.trend_months = 12;
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"topCategories": 5}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.top_categories, 5);
        assert_eq!(config.trend_months, DEFAULT_TREND_MONTHS);
    }

    #[test]
    fn zero_trend_months_is_rejected() {
        let config = Config {
            trend_months: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
