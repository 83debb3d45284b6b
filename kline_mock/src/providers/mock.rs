use async_trait::async_trait;
use tracing::info;

use crate::{
    generator::{GeneratorConfig, generate_with_config},
    models::bar_series::BarSeries,
    providers::{BarsRequest, DataProvider, ProviderError},
};

/// Serves generated series. Generation runs on tokio's blocking pool so a
/// 20k-bar series does not stall the caller's executor thread.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    config: GeneratorConfig,
}

impl MockProvider {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn fetch_bars(&self, request: BarsRequest) -> Result<BarSeries, ProviderError> {
        let config = self.config.clone();
        let series = tokio::task::spawn_blocking(move || {
            generate_with_config(request.duration_days, request.interval, &config)
        })
        .await
        .map_err(|e| ProviderError::Internal(e.to_string()))??;

        let series = match request.respace_ms {
            Some(step) => series.respaced(step),
            None => series,
        };
        info!(
            symbol = %series.symbol,
            interval = %series.interval,
            bars = series.len(),
            "served mock series"
        );
        Ok(series)
    }
}
