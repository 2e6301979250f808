use std::fs;
use std::path::Path;

use anyhow::Context;
use fieldsweep_core::GameConfig;
use serde::Deserialize;

/// Startup settings, read from a TOML file and overridden by flags.
///
/// ```toml
/// width = 16
/// height = 16
/// percent = 15.0
/// seed = 42
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub mines: Option<i32>,
    /// Mine density in percent of the field, takes precedence over `mines`.
    pub percent: Option<f32>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Values set in `other` win.
    pub fn merge(self, other: Settings) -> Self {
        Self {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            mines: other.mines.or(self.mines),
            percent: other.percent.or(self.percent),
            seed: other.seed.or(self.seed),
        }
    }

    pub fn game_config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        if let Some(width) = self.width {
            config = config.with_width(width);
        }
        if let Some(height) = self.height {
            config = config.with_height(height);
        }
        if let Some(percent) = self.percent {
            config = config.with_mine_fraction(percent / 100.0);
        } else if let Some(mines) = self.mines {
            config = config.with_mine_count(mines);
        }
        config
    }
}
