use std::path::Path;

use kline_mock::{
    generator::{GeneratorConfig, generate_period, generate_with_config},
    io::{SinkError, write_csv_file},
    models::{bar::Bar, bar_series::BarSeries, period::ChartPeriod},
    stats::{
        MarketStats, PriceChange, TrailingWindow, WindowStats, market_stats, price_change,
        window_stats,
    },
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    config::AppConfig,
    feed::{CrosshairEvent, LoadRequest, WidgetStyles, select_bars, widget_styles},
    settings::{
        self, ChartSettings, IndicatorKind, SettingsError, SettingsStore, Theme, load_stored_settings,
    },
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to generate series: {0}")]
    Generation(#[from] kline_mock::Error),

    #[error("failed to export series: {0}")]
    Export(#[from] SinkError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// What the market info panel shows for the displayed bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InfoPanel {
    pub bar: Bar,
    /// `true` while the crosshair is over a bar, `false` when showing the latest one.
    pub is_cursor: bool,
    pub change: PriceChange,
    pub h1: Option<WindowStats>,
    pub h24: Option<WindowStats>,
}

/// Application state behind the chart page.
#[derive(Debug, Clone)]
pub struct ChartSession {
    generator: GeneratorConfig,
    initial: BarSeries,
    initial_period: ChartPeriod,
    series: BarSeries,
    period: ChartPeriod,
    cursor: Option<Bar>,
    settings: ChartSettings,
}

impl ChartSession {
    /// Generates the initial series described by `config.session`. The
    /// toolbar starts at `settings.selected_timeframe`.
    pub fn new(config: &AppConfig, settings: ChartSettings) -> Result<Self, SessionError> {
        let initial = generate_with_config(
            config.session.initial_days,
            config.session.initial_interval,
            &config.generator,
        )?;
        let period = settings.selected_timeframe;
        info!(
            bars = initial.len(),
            interval = %initial.interval,
            period = %period,
            "chart session started"
        );
        Ok(Self {
            generator: config.generator.clone(),
            series: initial.clone(),
            initial,
            initial_period: period,
            period,
            cursor: None,
            settings,
        })
    }

    /// Starts from the settings in `store`. With nothing stored, defaults
    /// apply and the toolbar starts at `config.session.initial_period`.
    pub fn open(config: &AppConfig, store: &dyn SettingsStore) -> Result<Self, SessionError> {
        let settings = load_stored_settings(store).unwrap_or_else(|| ChartSettings {
            selected_timeframe: config.session.initial_period,
            ..ChartSettings::default()
        });
        Self::new(config, settings)
    }

    pub fn series(&self) -> &BarSeries {
        &self.series
    }

    pub fn period(&self) -> ChartPeriod {
        self.period
    }

    pub fn cursor(&self) -> Option<&Bar> {
        self.cursor.as_ref()
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    /// Regenerates the series for `period` and replaces the current one.
    /// On failure the session is left unchanged.
    pub fn select_period(&mut self, period: ChartPeriod) -> Result<&BarSeries, SessionError> {
        let series = generate_period(period, &self.generator)?;
        info!(period = %period, bars = series.len(), "period changed");
        self.period = period;
        self.settings.selected_timeframe = period;
        Ok(self.apply_series(series))
    }

    /// Replaces the whole series. The cursor points into the old data, so it is cleared.
    pub fn apply_series(&mut self, series: BarSeries) -> &BarSeries {
        self.cursor = None;
        self.series = series;
        &self.series
    }

    /// Back to the initial series and the default indicator set.
    pub fn reset(&mut self) {
        self.settings.reset_indicators();
        self.period = self.initial_period;
        self.settings.selected_timeframe = self.initial_period;
        let initial = self.initial.clone();
        self.apply_series(initial);
        info!("chart session reset");
    }

    /// Data callback of the widget.
    pub fn load_bars(&self, request: LoadRequest) -> &[Bar] {
        let bars = select_bars(&self.series.bars, request);
        debug!(kind = ?request.kind, bars = bars.len(), "widget data request");
        bars
    }

    /// Cursor callback of the widget.
    pub fn on_crosshair(&mut self, event: CrosshairEvent) {
        self.cursor = event.bar;
    }

    pub fn styles(&self) -> WidgetStyles {
        widget_styles(&self.settings, &self.period.plan())
    }

    /// Figures for the hovered bar, or for the latest bar when nothing is hovered.
    /// `None` for an empty series.
    pub fn info_panel(&self) -> Option<InfoPanel> {
        let (bar, is_cursor) = match self.cursor {
            Some(bar) => (bar, true),
            None => (*self.series.latest()?, false),
        };
        let window = |w: TrailingWindow| window_stats(&self.series, bar.timestamp, w.minutes());
        Some(InfoPanel {
            bar,
            is_cursor,
            change: price_change(&bar, self.series.previous()),
            h1: window(TrailingWindow::Hour),
            h24: window(TrailingWindow::Day),
        })
    }

    pub fn market_stats(&self) -> Option<MarketStats> {
        market_stats(&self.series)
    }

    /// Writes the current series as CSV. Returns the number of rows.
    pub fn export_csv(&self, path: &Path) -> Result<usize, SessionError> {
        Ok(write_csv_file(path, &self.series)?)
    }

    pub fn save_settings(&self, store: &mut dyn SettingsStore) -> Result<(), SessionError> {
        Ok(settings::save_settings(store, &self.settings)?)
    }

    pub fn toggle_indicator(&mut self, kind: IndicatorKind) -> Option<bool> {
        self.settings.toggle_indicator(kind)
    }

    pub fn set_indicator_period(&mut self, kind: IndicatorKind, period: u32) -> Option<u32> {
        self.settings.set_indicator_period(kind, period)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.settings.show_grid = !self.settings.show_grid;
        self.settings.show_grid
    }

    pub fn toggle_volume(&mut self) -> bool {
        self.settings.show_volume = !self.settings.show_volume;
        self.settings.show_volume
    }
}

#[cfg(test)]
mod tests {
    use kline_mock::models::interval::Interval;

    use super::*;
    use crate::settings::{MemoryStore, load_settings};

    const NOW: i64 = 1_700_000_000_000;

    fn config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.generator = GeneratorConfig::default().with_seed(7).with_now_ms(NOW);
        cfg.session.initial_days = 2.0;
        cfg.session.initial_interval = Interval::H1;
        cfg
    }

    fn session() -> ChartSession {
        ChartSession::new(&config(), ChartSettings::default()).unwrap()
    }

    #[test]
    fn initial_series_follows_session_config() {
        let s = session();
        assert_eq!(s.series().len(), 48);
        assert_eq!(s.series().interval, Interval::H1);
        assert_eq!(s.period(), ChartPeriod::H1);
        assert!(s.cursor().is_none());
    }

    #[test]
    fn default_session_styles_follow_toolbar_not_series() {
        let mut cfg = AppConfig::default();
        cfg.generator = GeneratorConfig::default().with_seed(1).with_now_ms(NOW);
        cfg.session.initial_days = 1.0;
        let s = ChartSession::open(&cfg, &MemoryStore::default()).unwrap();
        assert_eq!(s.series().interval, Interval::M1);
        let styles = s.styles();
        assert_eq!((styles.period_span, styles.bar_space), (1, 6));
        assert_eq!(styles.period_unit, kline_mock::models::period::PeriodUnit::Hour);
    }

    #[test]
    fn stored_timeframe_wins_over_config() {
        let mut cfg = config();
        cfg.session.initial_period = ChartPeriod::H4;

        let fresh = ChartSession::open(&cfg, &MemoryStore::default()).unwrap();
        assert_eq!(fresh.period(), ChartPeriod::H4);

        let mut store = MemoryStore::default();
        let stored = ChartSettings {
            selected_timeframe: ChartPeriod::M15,
            ..ChartSettings::default()
        };
        settings::save_settings(&mut store, &stored).unwrap();
        let restored = ChartSession::open(&cfg, &store).unwrap();
        assert_eq!(restored.period(), ChartPeriod::M15);
        assert_eq!(restored.settings().selected_timeframe, ChartPeriod::M15);
        assert_eq!(restored.styles().period_span, 15);
    }

    #[test]
    fn select_period_replaces_series_and_clears_cursor() {
        let mut s = session();
        let first = s.series().bars[0];
        s.on_crosshair(CrosshairEvent::at(first));
        assert!(s.cursor().is_some());

        let len = s.select_period(ChartPeriod::D1).unwrap().len();
        assert_eq!(len, 180);
        assert_eq!(s.series().interval, Interval::D1);
        assert_eq!(s.settings().selected_timeframe, ChartPeriod::D1);
        assert!(s.cursor().is_none());
    }

    #[test]
    fn reset_restores_initial_series_and_indicators() {
        let mut s = session();
        let initial = s.series().clone();
        s.toggle_indicator(IndicatorKind::Rsi);
        s.select_period(ChartPeriod::M5).unwrap();
        s.reset();
        assert_eq!(s.series(), &initial);
        assert_eq!(s.period(), ChartPeriod::H1);
        assert_eq!(s.settings().indicators, settings::default_indicators());
    }

    #[test]
    fn load_bars_hands_over_whole_series_on_init() {
        let s = session();
        assert_eq!(s.load_bars(LoadRequest::init()).len(), s.series().len());
        let last = s.series().latest().unwrap().timestamp;
        assert!(s.load_bars(LoadRequest::forward(last)).is_empty());
        assert_eq!(s.load_bars(LoadRequest::backward(last)).len(), s.series().len() - 1);
    }

    #[test]
    fn info_panel_tracks_cursor() {
        let mut s = session();
        let latest = *s.series().latest().unwrap();
        let panel = s.info_panel().unwrap();
        assert_eq!(panel.bar, latest);
        assert!(!panel.is_cursor);
        assert!(panel.h1.is_some());
        assert!(panel.h24.is_some());

        let hovered = s.series().bars[10];
        s.on_crosshair(CrosshairEvent::at(hovered));
        let panel = s.info_panel().unwrap();
        assert_eq!(panel.bar, hovered);
        assert!(panel.is_cursor);
        let h1 = panel.h1.unwrap();
        assert_eq!(h1.max, hovered.high);
        assert_eq!(h1.min, hovered.low);
        assert_eq!(h1.volume, hovered.volume);

        s.on_crosshair(CrosshairEvent::leave());
        assert!(!s.info_panel().unwrap().is_cursor);
    }

    #[test]
    fn empty_series_has_no_panel() {
        let mut s = session();
        let empty = BarSeries::new("BTC-USDT", Interval::M1, Vec::new());
        s.apply_series(empty);
        assert!(s.info_panel().is_none());
        assert!(s.market_stats().is_none());
        assert!(s.load_bars(LoadRequest::init()).is_empty());
    }

    #[test]
    fn style_toggles_reach_widget_styles() {
        let mut s = session();
        assert!(!s.toggle_grid());
        assert!(!s.toggle_volume());
        s.set_theme(Theme::Light);
        let styles = s.styles();
        assert!(!styles.show_grid);
        assert!(!styles.show_volume);
        assert_eq!(styles.background, "#ffffff");
        assert_eq!(s.set_indicator_period(IndicatorKind::Ma, 500), Some(100));
    }

    #[test]
    fn settings_round_trip_through_store() {
        let mut s = session();
        s.set_theme(Theme::Light);
        s.select_period(ChartPeriod::M15).unwrap();
        let mut store = MemoryStore::default();
        s.save_settings(&mut store).unwrap();
        let loaded = load_settings(&store);
        assert_eq!(&loaded, s.settings());
    }

    #[test]
    fn export_writes_every_bar() {
        let dir = tempfile::tempdir().unwrap();
        let s = session();
        let path = dir.path().join("out").join("kline_data.csv");
        assert_eq!(s.export_csv(&path).unwrap(), 48);
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 49);
    }
}
