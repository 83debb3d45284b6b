//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, the seam the chart session
//! pulls series through. [`mock::MockProvider`] is the in-process generator
//! backed implementation.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) so the series source can be chosen at runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use kline_mock::models::{bar_series::BarSeries, interval::Interval};
//! use kline_mock::providers::{BarsRequest, DataProvider, ProviderError};
//!
//! struct EmptyProvider;
//!
//! #[async_trait]
//! impl DataProvider for EmptyProvider {
//!     async fn fetch_bars(&self, request: BarsRequest) -> Result<BarSeries, ProviderError> {
//!         Ok(BarSeries::new("NONE", request.interval, vec![]))
//!     }
//! }
//! ```

pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    errors::Error,
    models::{bar_series::BarSeries, interval::Interval, period::ChartPeriod},
};

/// What series to produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarsRequest {
    pub duration_days: f64,
    pub interval: Interval,
    /// Restamp bars this far apart after generation.
    #[serde(default)]
    pub respace_ms: Option<i64>,
}

impl From<ChartPeriod> for BarsRequest {
    fn from(period: ChartPeriod) -> Self {
        let plan = period.plan();
        Self {
            duration_days: plan.duration_days,
            interval: plan.interval,
            respace_ms: plan.respace_ms,
        }
    }
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request was rejected by the generator.
    #[error("Generation failed: {0}")]
    Generation(#[from] Error),

    /// An internal error occurred while producing data (e.g. a worker task panicked).
    #[error("Internal provider error: {0}")]
    Internal(String),
}

/// Trait for fetching time-series bar data.
#[async_trait]
pub trait DataProvider {
    /// Produces the series described by `request`.
    async fn fetch_bars(&self, request: BarsRequest) -> Result<BarSeries, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generator::GeneratorConfig, providers::mock::MockProvider};

    struct EmptyProvider;

    #[async_trait]
    impl DataProvider for EmptyProvider {
        async fn fetch_bars(&self, request: BarsRequest) -> Result<BarSeries, ProviderError> {
            Ok(BarSeries::new("NONE", request.interval, vec![]))
        }
    }

    // Chosen at runtime, hence the trait object.
    fn get_provider(name: &str) -> Box<dyn DataProvider + Send + Sync> {
        if name == "mock" {
            Box::new(MockProvider::new(GeneratorConfig::default().with_seed(3)))
        } else {
            Box::new(EmptyProvider)
        }
    }

    #[tokio::test]
    async fn test_dynamic_provider() {
        let request = BarsRequest::from(ChartPeriod::H4);

        let empty = get_provider("empty").fetch_bars(request).await.unwrap();
        assert!(empty.is_empty());

        let mock = get_provider("mock").fetch_bars(request).await.unwrap();
        assert_eq!(mock.len(), 14 * 6);
        assert_eq!(mock.interval, Interval::H4);
    }

    #[test]
    fn weekly_request_carries_respacing() {
        let r = BarsRequest::from(ChartPeriod::W1);
        assert_eq!(r.interval, Interval::D1);
        assert_eq!(r.respace_ms, Some(7 * 86_400_000));
    }
}
