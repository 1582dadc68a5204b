//! Application configuration persisted as a JSON document with
//! timestamped backups.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::{FinanceError, Result};
use crate::utils::{
    fs::{ensure_dir, parse_backup_timestamp, sanitize_note, write_atomic},
    paths,
};

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub last_opened_book: Option<String>,
}

impl Config {
    fn default_locale() -> String {
        "pt-BR".into()
    }

    fn default_currency() -> String {
        "BRL".into()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            theme: None,
            last_opened_book: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::from_base(&paths::app_data_dir())
    }

    pub fn from_base(base: &Path) -> Self {
        Self {
            path: paths::config_file_in(base),
            backups_dir: paths::config_backups_dir_in(base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file, falling back to defaults when it does not
    /// exist yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf> {
        if !self.path.exists() {
            return Err(FinanceError::ConfigError(
                "no config file to back up".into(),
            ));
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_stem = format!("config_{}", timestamp);
        if let Some(label) = sanitize_note(note) {
            file_stem.push('_');
            file_stem.push_str(&label);
        }
        let target = self.backups_dir.join(format!("{}.json", file_stem));
        fs::copy(&self.path, &target)?;
        Ok(target)
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config> {
        let source = self.backups_dir.join(backup_name);
        if !source.exists() {
            return Err(FinanceError::ConfigError(format!(
                "config backup `{}` not found",
                backup_name
            )));
        }
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        fs::copy(&source, &self.path)?;
        self.load()
    }

    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(file_name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
