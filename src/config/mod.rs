use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::services::Granularity;
use crate::core::utils::{app_data_dir, config_file_in, store_dir_in};
use crate::currency::{CurrencyCode, LocaleConfig};
use crate::errors::LedgerError;
use crate::storage::DEFAULT_STORAGE_KEY;
use crate::utils::persistence::{read_optional, write_atomic};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub storage_key: String,
    /// Overrides where the month store keeps its documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub chart_granularity: Granularity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            storage_key: DEFAULT_STORAGE_KEY.into(),
            data_dir: None,
            chart_granularity: Granularity::Day,
        }
    }
}

impl Config {
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }

    /// Updates one user-facing setting from its textual form.
    ///
    /// `storage_key` and `data_dir` pick the store itself and are only read at
    /// startup, so they are edited in the file rather than here.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "locale" => {
                let tag = value.replace('_', "-");
                if !matches!(tag.to_ascii_lowercase().as_str(), "pt-br" | "pt" | "en-us" | "en") {
                    return Err(LedgerError::Config(format!(
                        "unsupported locale `{value}` (use pt-BR or en-US)"
                    )));
                }
                self.locale = tag;
            }
            "currency" => {
                if value.len() != 3 || !value.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    return Err(LedgerError::Config(format!(
                        "`{value}` is not a three-letter currency code"
                    )));
                }
                self.currency = CurrencyCode::new(value).as_str().to_string();
            }
            "chart" | "chart_granularity" => {
                self.chart_granularity = Granularity::parse(value).ok_or_else(|| {
                    LedgerError::Config(format!("`{value}` is not day or month"))
                })?;
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown setting `{other}` (use locale, currency or chart)"
                )))
            }
        }
        Ok(())
    }

    /// Directory for store documents: `data_dir` when set, otherwise
    /// `<base>/store`.
    pub fn store_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| store_dir_in(base))
    }
}

/// Loads and saves [`Config`] as pretty JSON inside the data directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let path = config_file_in(&base);
        Self { base, path }
    }

    /// Returns the stored configuration, or defaults when none was saved.
    pub fn load(&self) -> Result<Config, LedgerError> {
        match read_optional(&self.path)? {
            Some(data) => serde_json::from_str(&data).map_err(|err| {
                LedgerError::Config(format!("{}: {}", self.path.display(), err))
            }),
            None => Ok(Config::default()),
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
