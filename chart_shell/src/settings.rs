//! Persisted chart settings.
//!
//! The whole snapshot is stored as one JSON blob under [`SETTINGS_KEY`] in a
//! flat key-value store. There is no schema version: a blob that fails to
//! parse is discarded in favour of defaults.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use kline_mock::models::period::ChartPeriod;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Key the settings blob is stored under.
pub const SETTINGS_KEY: &str = "klineChartSettings";

/// Allowed indicator periods.
pub const PERIOD_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings store I/O failed for {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings store {path} is not a JSON object of strings")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode settings")]
    Encode(#[from] serde_json::Error),
}

/// Technical indicators the chart can overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndicatorKind {
    Ma,
    Ema,
    Boll,
    Macd,
    Kdj,
    Rsi,
}

impl IndicatorKind {
    /// MA, EMA and BOLL draw on the candle pane; the rest get their own pane.
    pub fn is_overlay(self) -> bool {
        matches!(self, IndicatorKind::Ma | IndicatorKind::Ema | IndicatorKind::Boll)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSetting {
    pub name: IndicatorKind,
    pub enabled: bool,
    pub period: u32,
    pub color: String,
}

impl IndicatorSetting {
    fn new(name: IndicatorKind, enabled: bool, period: u32, color: &str) -> Self {
        Self {
            name,
            enabled,
            period,
            color: color.to_string(),
        }
    }
}

/// Initial indicator list, in toolbar order.
pub fn default_indicators() -> Vec<IndicatorSetting> {
    use IndicatorKind::*;
    vec![
        IndicatorSetting::new(Ma, true, 20, "#FF6B6B"),
        IndicatorSetting::new(Ema, false, 12, "#4ECDC4"),
        IndicatorSetting::new(Boll, true, 20, "#45B7D1"),
        IndicatorSetting::new(Macd, false, 12, "#96CEB4"),
        IndicatorSetting::new(Kdj, true, 9, "#FFEAA7"),
        IndicatorSetting::new(Rsi, false, 14, "#DDA0DD"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Snapshot of the chart controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartSettings {
    pub indicators: Vec<IndicatorSetting>,
    pub theme: Theme,
    pub show_grid: bool,
    pub show_volume: bool,
    pub selected_timeframe: ChartPeriod,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            indicators: default_indicators(),
            theme: Theme::default(),
            show_grid: true,
            show_volume: true,
            selected_timeframe: ChartPeriod::default(),
        }
    }
}

impl ChartSettings {
    pub fn indicator(&self, kind: IndicatorKind) -> Option<&IndicatorSetting> {
        self.indicators.iter().find(|i| i.name == kind)
    }

    pub fn enabled_indicators(&self) -> impl Iterator<Item = &IndicatorSetting> {
        self.indicators.iter().filter(|i| i.enabled)
    }

    /// Flips `kind` on or off. Returns the new state, `None` if not listed.
    pub fn toggle_indicator(&mut self, kind: IndicatorKind) -> Option<bool> {
        let ind = self.indicators.iter_mut().find(|i| i.name == kind)?;
        ind.enabled = !ind.enabled;
        Some(ind.enabled)
    }

    /// Sets the period of `kind`, clamped to [`PERIOD_RANGE`]. Returns the
    /// stored value.
    pub fn set_indicator_period(&mut self, kind: IndicatorKind, period: u32) -> Option<u32> {
        let ind = self.indicators.iter_mut().find(|i| i.name == kind)?;
        ind.period = period.clamp(*PERIOD_RANGE.start(), *PERIOD_RANGE.end());
        Some(ind.period)
    }

    pub fn reset_indicators(&mut self) {
        self.indicators = default_indicators();
    }
}

/// Flat string key-value storage.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError>;
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A JSON object file of `key -> string`. Other keys in the file are kept
/// when a value is written.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<IndexMap<String, String>, SettingsError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        serde_json::from_str(&text).map_err(|source| SettingsError::CorruptStore {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.read_all()?.shift_remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);
        let text = serde_json::to_string_pretty(&all)?;
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, text).map_err(io_err)
    }
}

/// Writes `settings` under [`SETTINGS_KEY`].
pub fn save_settings(store: &mut dyn SettingsStore, settings: &ChartSettings) -> Result<(), SettingsError> {
    let blob = serde_json::to_string(settings)?;
    store.set(SETTINGS_KEY, blob)?;
    info!(timeframe = %settings.selected_timeframe, "chart settings saved");
    Ok(())
}

/// Reads the stored snapshot. `None` when it is missing, unreadable or
/// malformed.
pub fn load_stored_settings(store: &dyn SettingsStore) -> Option<ChartSettings> {
    let blob = match store.get(SETTINGS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!("no stored chart settings");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "settings store unreadable");
            return None;
        }
    };
    match serde_json::from_str::<ChartSettings>(&blob) {
        Ok(mut settings) => {
            for ind in &mut settings.indicators {
                ind.period = ind.period.clamp(*PERIOD_RANGE.start(), *PERIOD_RANGE.end());
            }
            Some(settings)
        }
        Err(e) => {
            warn!(error = %e, "stored chart settings are malformed");
            None
        }
    }
}

/// Like [`load_stored_settings`], falling back to defaults.
pub fn load_settings(store: &dyn SettingsStore) -> ChartSettings {
    load_stored_settings(store).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_blob_snapshot() {
        insta::assert_json_snapshot!("default_chart_settings", &ChartSettings::default());
    }

    #[test]
    fn blob_uses_widget_field_names() {
        let v = serde_json::to_value(ChartSettings::default()).unwrap();
        assert_eq!(v["theme"], "dark");
        assert_eq!(v["showGrid"], true);
        assert_eq!(v["showVolume"], true);
        assert_eq!(v["selectedTimeframe"], "1h");
        assert_eq!(v["indicators"][0]["name"], "MA");
        assert_eq!(v["indicators"][3]["name"], "MACD");
    }

    #[test]
    fn toggle_and_clamp() {
        let mut s = ChartSettings::default();
        assert_eq!(s.toggle_indicator(IndicatorKind::Ema), Some(true));
        assert_eq!(s.toggle_indicator(IndicatorKind::Ema), Some(false));
        assert_eq!(s.set_indicator_period(IndicatorKind::Rsi, 0), Some(1));
        assert_eq!(s.set_indicator_period(IndicatorKind::Rsi, 500), Some(100));
        assert_eq!(s.set_indicator_period(IndicatorKind::Rsi, 21), Some(21));

        s.indicators.retain(|i| i.name != IndicatorKind::Kdj);
        assert_eq!(s.toggle_indicator(IndicatorKind::Kdj), None);

        s.reset_indicators();
        assert_eq!(s.indicators, default_indicators());
    }

    #[test]
    fn enabled_by_default() {
        let s = ChartSettings::default();
        let on: Vec<_> = s.enabled_indicators().map(|i| i.name).collect();
        assert_eq!(on, vec![IndicatorKind::Ma, IndicatorKind::Boll, IndicatorKind::Kdj]);
        assert!(IndicatorKind::Boll.is_overlay());
        assert!(!IndicatorKind::Kdj.is_overlay());
    }

    #[test]
    fn memory_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(load_settings(&store), ChartSettings::default());

        let mut s = ChartSettings::default();
        s.theme = Theme::Light;
        s.show_grid = false;
        s.selected_timeframe = ChartPeriod::M15;
        save_settings(&mut store, &s).unwrap();
        assert_eq!(load_settings(&store), s);
    }

    #[test]
    fn malformed_blob_falls_back() {
        let mut store = MemoryStore::default();
        store.set(SETTINGS_KEY, "{not json".into()).unwrap();
        assert!(load_stored_settings(&store).is_none());
        assert_eq!(load_settings(&store), ChartSettings::default());
    }

    #[test]
    fn partial_blob_fills_defaults_and_clamps() {
        let mut store = MemoryStore::default();
        store
            .set(
                SETTINGS_KEY,
                r##"{"theme":"light","indicators":[{"name":"RSI","enabled":true,"period":0,"color":"#fff"}]}"##.into(),
            )
            .unwrap();
        let s = load_settings(&store);
        assert_eq!(s.theme, Theme::Light);
        assert!(s.show_volume);
        assert_eq!(s.indicators.len(), 1);
        assert_eq!(s.indicators[0].period, 1);
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let mut store = FileStore::new(&path);
        assert_eq!(store.get(SETTINGS_KEY).unwrap(), None);

        store.set("currentUser", "{\"id\":\"1\"}".into()).unwrap();
        save_settings(&mut store, &ChartSettings::default()).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("currentUser").unwrap().as_deref(), Some("{\"id\":\"1\"}"));
        assert_eq!(load_settings(&reopened), ChartSettings::default());
    }

    #[test]
    fn corrupt_file_store_is_an_error_but_load_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get(SETTINGS_KEY), Err(SettingsError::CorruptStore { .. })));
        assert_eq!(load_settings(&store), ChartSettings::default());
    }
}
