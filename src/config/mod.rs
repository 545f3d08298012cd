use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        errors::{LedgerError, Result},
        format::GroupedFormatter,
        utils::{app_data_dir, config_file_in, data_file_in, replace_file},
    },
    domain::{CategorySet, PRESET_CATEGORIES},
};

/// Substrings that mark a category as the default for USD entries.
pub const DEFAULT_CATEGORY_MARKERS: [&str; 2] = ["USD", "Шаяны"];

/// How repeated sort requests choose their direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// One direction flag shared by every column, flipped after each sort.
    #[default]
    Shared,
    /// Each column remembers its own direction.
    PerColumn,
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Ledger document location. Defaults to `data.json` in the app directory.
    pub data_file: Option<PathBuf>,
    pub preset_categories: Vec<String>,
    pub category_markers: Vec<String>,
    pub sort_mode: SortMode,
    pub thousands_separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            preset_categories: PRESET_CATEGORIES.iter().map(|name| name.to_string()).collect(),
            category_markers: DEFAULT_CATEGORY_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
            sort_mode: SortMode::default(),
            thousands_separator: ' ',
        }
    }
}

impl Config {
    /// Category seed for new or category-less ledgers. Falls back to the built-in presets.
    pub fn presets(&self) -> CategorySet {
        let presets = CategorySet::from_names(self.preset_categories.iter().cloned());
        if presets.is_empty() {
            CategorySet::presets()
        } else {
            presets
        }
    }

    /// Total formatter grouping digits with the configured separator.
    pub fn formatter(&self) -> GroupedFormatter {
        GroupedFormatter::new(self.thousands_separator)
    }

    /// Resolves the ledger document path against `base` when none is configured.
    pub fn data_path_in(&self, base: &Path) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| data_file_in(base))
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_path_in(&app_data_dir())
    }
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at the application data directory.
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let config_path = config_file_in(&base);
        Self { base, config_path }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads preferences, returning defaults when no file exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)
            .map_err(|err| LedgerError::Config(err.to_string()))?;
        serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
    }

    /// Loads preferences, logging and falling back to defaults on any failure.
    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|err| {
            tracing::warn!(path = %self.config_path.display(), %err, "using default configuration");
            Config::default()
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| LedgerError::Config(err.to_string()))?;
        replace_file(&self.config_path, &json)
    }

    /// Ledger document path for `config`, resolved against this manager's base directory.
    pub fn data_path(&self, config: &Config) -> PathBuf {
        config.data_path_in(&self.base)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
