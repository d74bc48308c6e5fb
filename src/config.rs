// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::color_utils::Palette;
use crate::context::AppContext;
use crate::period::ALLOWED_MONTH_SPANS;
use anyhow::{Error, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_events_file() -> PathBuf {
    PathBuf::from("events.txt")
}

fn default_months() -> u32 {
    1
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_events_file")]
    pub events_file: PathBuf,
    /// Foreground for tags that name no (or an unknown) colour.
    #[serde(default)]
    pub default_fg: Palette,
    #[serde(default = "default_months")]
    pub months: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_file: default_events_file(),
            default_fg: Palette::default(),
            months: default_months(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !ALLOWED_MONTH_SPANS.contains(&self.months) {
            return Err(anyhow::anyhow!(
                "Invalid months value {}. Must be 1, 3, 6, or 12.",
                self.months
            ));
        }
        Ok(())
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, toml_str)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Events file with a leading `~/` expanded to the home directory.
    pub fn resolved_events_file(&self) -> PathBuf {
        if let Ok(rest) = self.events_file.strip_prefix("~")
            && let Some(dirs) = BaseDirs::new()
        {
            return dirs.home_dir().join(rest);
        }
        self.events_file.clone()
    }
}
