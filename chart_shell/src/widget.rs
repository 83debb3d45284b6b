//! Waiting for the chart widget to become available.
//!
//! The widget library is an optional dependency. The shell polls a probe
//! until it reports ready or a deadline passes, and then either renders the
//! chart or a placeholder. Nothing here returns an error.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Reports whether the widget library is loaded.
pub trait WidgetProbe {
    fn is_loaded(&self) -> bool;
}

impl<F: Fn() -> bool> WidgetProbe for F {
    fn is_loaded(&self) -> bool {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetStatus {
    Loading,
    Ready,
    Unavailable { title: String, hint: String },
}

impl WidgetStatus {
    pub fn unavailable() -> Self {
        WidgetStatus::Unavailable {
            title: "Chart failed to load".to_string(),
            hint: "Check your network connection or reload the page".to_string(),
        }
    }

    /// Text shown instead of the chart, if any.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            WidgetStatus::Loading => Some("Loading chart...".to_string()),
            WidgetStatus::Ready => None,
            WidgetStatus::Unavailable { title, hint } => Some(format!("{title}\n{hint}")),
        }
    }
}

/// Polls `probe` every `poll_interval` until it is loaded or `timeout` elapses.
pub async fn wait_for_widget<P: WidgetProbe + ?Sized>(probe: &P, options: LoaderOptions) -> WidgetStatus {
    let deadline = Instant::now() + options.timeout;
    loop {
        if probe.is_loaded() {
            info!("chart widget ready");
            return WidgetStatus::Ready;
        }
        let now = Instant::now();
        if now >= deadline {
            warn!(timeout_ms = options.timeout.as_millis() as u64, "chart widget did not load");
            return WidgetStatus::unavailable();
        }
        sleep(options.poll_interval.min(deadline - now)).await;
    }
}
