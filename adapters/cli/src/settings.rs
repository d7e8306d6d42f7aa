//! Runtime settings loaded from an optional TOML file.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use snake_core::TICKS_PER_SECOND;

/// Settings that may change between runs without rebuilding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Seed for the world's random source; drawn from the OS when absent.
    pub(crate) seed: Option<u64>,
    /// Ticks processed per second.
    pub(crate) tick_rate: u32,
    /// Whether presentation waits for the display refresh.
    pub(crate) vsync: bool,
    /// Whether the measured tick rate is logged once per second.
    pub(crate) show_tick_rate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: TICKS_PER_SECOND,
            vsync: true,
            show_tick_rate: false,
        }
    }
}

impl Settings {
    /// Reads settings from the TOML file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load settings from {}", path.display()))
    }

    /// Parses settings from TOML, filling omitted keys with defaults.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).context("failed to parse settings toml")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects settings the game loop cannot run with.
    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(self.tick_rate > 0, "tick_rate must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_toml_str("").expect("empty settings parse");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tick_rate, 20);
        assert!(settings.vsync);
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = Settings::from_toml_str("seed = 99\ntick_rate = 12\nvsync = false\n")
            .expect("valid settings");

        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.tick_rate, 12);
        assert!(!settings.vsync);
        assert!(!settings.show_tick_rate);
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let error = Settings::from_toml_str("tick_rate = 0").expect_err("zero rate rejected");
        assert!(error.to_string().contains("tick_rate"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::from_toml_str("board_width = 800").is_err());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = Settings::load(Path::new("does/not/exist.toml")).expect_err("missing file");
        assert!(format!("{error:#}").contains("does/not/exist.toml"));
    }
}
