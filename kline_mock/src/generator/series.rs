//! OHLCV random walk.

use rand::Rng;
use tracing::debug;

use crate::{
    errors::Error,
    generator::{GeneratorConfig, round2},
    models::{
        bar::Bar,
        bar_series::BarSeries,
        interval::{Interval, MINUTES_PER_DAY, MS_PER_MINUTE},
        period::ChartPeriod,
    },
};

/// Upper bound on bars per series. A month of 1m bars is ~43k.
pub const MAX_DATA_POINTS: usize = 5_000_000;

/// Generates `duration_days` worth of `interval` bars ending now, using the
/// default configuration and an OS-seeded RNG.
pub fn generate(duration_days: f64, interval: Interval) -> Result<BarSeries, Error> {
    generate_with_config(duration_days, interval, &GeneratorConfig::default())
}

/// Like [`generate`], drawing randomness from `config.rng()`.
pub fn generate_with_config(
    duration_days: f64,
    interval: Interval,
    config: &GeneratorConfig,
) -> Result<BarSeries, Error> {
    let mut rng = config.rng();
    generate_with_rng(duration_days, interval, config, &mut rng)
}

/// Generates the series the chart shows for a toolbar period.
pub fn generate_period(period: ChartPeriod, config: &GeneratorConfig) -> Result<BarSeries, Error> {
    let plan = period.plan();
    let series = generate_with_config(plan.duration_days, plan.interval, config)?;
    Ok(match plan.respace_ms {
        Some(step) => series.respaced(step),
        None => series,
    })
}

/// Number of bars covering `duration_days` at `interval`.
///
/// Durations shorter than one interval yield zero bars.
pub fn data_points(duration_days: f64, interval: Interval) -> Result<usize, Error> {
    if !duration_days.is_finite() || duration_days <= 0.0 {
        return Err(Error::invalid(format!(
            "duration must be a positive number of days, got {duration_days}"
        )));
    }
    let points = (duration_days * MINUTES_PER_DAY / interval.minutes() as f64).floor();
    if points > MAX_DATA_POINTS as f64 {
        return Err(Error::invalid(format!(
            "{duration_days} days at {interval} is {points} bars, above the {MAX_DATA_POINTS} limit"
        )));
    }
    Ok(points as usize)
}

/// Generates a series drawing every random number from `rng`.
///
/// The walk per step `i`:
/// - price change = slow trend `sin(i/100)*1%` + uniform noise scaled by
///   `volatility` + faster sentiment `sin(i/50)*0.5%`
/// - running price *= 1 + change, clamped to the configured band; that is
///   the bar's open
/// - high/low/close are independent offsets of the open, then high/low are
///   widened to enclose open and close
/// - volume scales with |change| and a `sin(i/24)` session curve, with
///   uniform jitter
/// - the next step starts from this close and a smoothed copy of this volume
pub fn generate_with_rng<R: Rng + ?Sized>(
    duration_days: f64,
    interval: Interval,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<BarSeries, Error> {
    config.validate()?;
    let n = data_points(duration_days, interval)?;

    let step_ms = interval.minutes() as i64 * MS_PER_MINUTE;
    let span_ms = (duration_days * MINUTES_PER_DAY * MS_PER_MINUTE as f64).round() as i64;
    let start_ms = config.now_ms() - span_ms;

    let mut bars = Vec::with_capacity(n);
    let mut base_price = config.start_price;
    let mut base_volume = config.start_volume;

    for i in 0..n {
        let t = i as f64;
        let trend = (t / 100.0).sin() * 0.01;
        let noise = (rng.random::<f64>() - 0.5) * config.volatility;
        let sentiment = (t / 50.0).sin() * 0.005;
        let change = trend + noise + sentiment;

        base_price = (base_price * (1.0 + change)).clamp(config.price_floor, config.price_ceiling);

        let open = base_price;
        let high = open * (1.0 + rng.random::<f64>() * 0.015);
        let low = open * (1.0 - rng.random::<f64>() * 0.015);
        let close = open * (1.0 + (rng.random::<f64>() - 0.5) * 0.02);

        let move_factor = 1.0 + change.abs() * 15.0;
        let session_factor = 1.0 + (t / 24.0).sin() * 0.3;
        let volume = (base_volume * move_factor * session_factor * (0.5 + rng.random::<f64>())).floor();

        bars.push(seal_bar(start_ms + i as i64 * step_ms, open, high, low, close, volume));

        base_price = close;
        base_volume = volume * (0.8 + rng.random::<f64>() * 0.4);
    }

    debug!(
        symbol = %config.symbol,
        %interval,
        duration_days,
        bars = bars.len(),
        "generated mock series"
    );

    Ok(BarSeries::new(config.symbol.clone(), interval, bars))
}

/// Rounds and widens so that `high >= max(open, close)` and
/// `low <= min(open, close)` hold on the emitted (rounded) values.
fn seal_bar(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Bar {
    let open = round2(open);
    let close = round2(close);
    Bar {
        timestamp,
        open,
        high: round2(high).max(open).max(close),
        low: round2(low).min(open).min(close),
        close,
        volume: volume.max(0.0) as u64,
    }
}
