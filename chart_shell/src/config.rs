//! Application configuration: TOML file plus environment overrides.
//!
//! Every section and field is optional; an empty file yields
//! [`AppConfig::default`].
//!
//! ```toml
//! [generator]
//! symbol = "ETH-USDT"
//! seed = 42
//! start_price = 3000.0
//! price_floor = 1000.0
//! price_ceiling = 9000.0
//!
//! [session]
//! initial_days = 7.0
//! initial_interval = "5m"
//! initial_period = "1h"
//!
//! [settings]
//! path = "/home/me/.config/kline/settings.json"
//! ```
//!
//! Environment overrides (applied by [`load_config_path`] and
//! [`AppConfig::from_env_defaults`]):
//! - `KLINE_SETTINGS_PATH` replaces `settings.path`
//! - `KLINE_SEED` replaces `generator.seed`

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use kline_mock::{
    generator::GeneratorConfig,
    models::{interval::Interval, period::ChartPeriod},
};
use serde::{Deserialize, Serialize};
use shared_utils::env::{EnvVarError, get_env_var_opt, parse_env_var};

pub const ENV_SETTINGS_PATH: &str = "KLINE_SETTINGS_PATH";
pub const ENV_SEED: &str = "KLINE_SEED";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub session: SessionConfig,
    pub settings: SettingsConfig,
}

/// What the chart shows before the user picks a period.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub initial_days: f64,
    pub initial_interval: Interval,
    /// Toolbar selection shown as active on start when no settings are
    /// stored. It only drives the widget styles: the initial series keeps
    /// `initial_interval` until a period is picked, so the default 1h
    /// selection labels a 1m series.
    pub initial_period: ChartPeriod,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_days: 14.0,
            initial_interval: Interval::M1,
            initial_period: ChartPeriod::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsConfig {
    /// Key-value file holding the persisted chart settings.
    pub path: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("kline_settings.json"),
        }
    }
}

impl AppConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env_defaults() -> Result<Self, EnvVarError> {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides()?;
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), EnvVarError> {
        if let Some(path) = get_env_var_opt(ENV_SETTINGS_PATH) {
            self.settings.path = PathBuf::from(path);
        }
        if let Some(seed) = parse_env_var::<u64>(ENV_SEED)? {
            self.generator.seed = Some(seed);
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.generator.validate().context("invalid [generator] section")?;
        let days = self.session.initial_days;
        if !days.is_finite() || days <= 0.0 {
            bail!("session.initial_days must be > 0, got {days}");
        }
        Ok(())
    }
}

/// Parse and validate a config from a TOML string. No environment overrides.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(toml_str).context("failed to parse config TOML")?;
    cfg.validate()?;
    Ok(cfg)
}

/// Read a config file, parse it, apply environment overrides and validate.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<AppConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    let mut cfg = load_config_str(&text)?;
    cfg.apply_env_overrides()?;
    cfg.validate()?;
    Ok(cfg)
}
