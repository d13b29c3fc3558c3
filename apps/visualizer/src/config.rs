use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context};
use playback::PlaybackOptions;
use radix_engine::EngineOptions;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "visualizer.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub sort_delay_ms: u64,
    pub highlight_delay_ms: u64,
    pub number_count: usize,
    pub min_value: u64,
    pub max_value: u64,
    pub reject_empty: bool,
    pub bar_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort_delay_ms: 150,
            highlight_delay_ms: 100,
            number_count: 20,
            min_value: 10,
            max_value: 999,
            reject_empty: false,
            bar_width: 50,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.min_value <= self.max_value,
            "min_value ({}) must not exceed max_value ({})",
            self.min_value,
            self.max_value
        );
        ensure!(self.bar_width > 0, "bar_width must be at least 1");
        Ok(())
    }

    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            sort_delay: Duration::from_millis(self.sort_delay_ms),
            highlight_delay: Duration::from_millis(self.highlight_delay_ms),
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            reject_empty: self.reject_empty,
        }
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = value.trim();
        match key {
            "sort_delay_ms" => self.sort_delay_ms = parse_value(key, value)?,
            "highlight_delay_ms" => self.highlight_delay_ms = parse_value(key, value)?,
            "number_count" => self.number_count = parse_value(key, value)?,
            "min_value" => self.min_value = parse_value(key, value)?,
            "max_value" => self.max_value = parse_value(key, value)?,
            "reject_empty" => self.reject_empty = parse_value(key, value)?,
            "bar_width" => self.bar_width = parse_value(key, value)?,
            _ => warn!(key, "ignoring unknown visualizer setting"),
        }
        Ok(())
    }
}

fn parse_value<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse::<T>()
        .with_context(|| format!("invalid value '{value}' for setting '{key}'"))
}

const ENV_KEYS: [(&str, &str); 7] = [
    ("APP__SORT_DELAY_MS", "sort_delay_ms"),
    ("APP__HIGHLIGHT_DELAY_MS", "highlight_delay_ms"),
    ("APP__NUMBER_COUNT", "number_count"),
    ("APP__MIN_VALUE", "min_value"),
    ("APP__MAX_VALUE", "max_value"),
    ("APP__REJECT_EMPTY", "reject_empty"),
    ("APP__BAR_WIDTH", "bar_width"),
];

/// Defaults, then the TOML file at `path` (if present), then `APP__*` variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings_from(path, |key| std::env::var(key).ok())
}

fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        let file_cfg = raw
            .parse::<toml::Table>()
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        for (key, value) in &file_cfg {
            let value = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            settings
                .set(key, &value)
                .with_context(|| format!("in config file '{}'", path.display()))?;
        }
    }

    for (var, key) in ENV_KEYS {
        if let Some(value) = env(var) {
            settings
                .set(key, &value)
                .with_context(|| format!("from environment variable {var}"))?;
        }
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
