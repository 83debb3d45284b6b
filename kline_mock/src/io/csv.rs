//! CSV export of a series.
//!
//! One header row, then one row per bar:
//! `timestamp,open,high,low,close,volume`, with the timestamp rendered as a
//! local date-time (`%Y-%m-%d %H:%M:%S`).

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{DateTime, Local};
use snafu::{OptionExt, ResultExt};
use tracing::info;

use crate::{
    io::sink::{ConversionSnafu, CsvSnafu, DataSink, IoSnafu, SinkError},
    models::{bar::Bar, bar_series::BarSeries},
};

pub const CSV_HEADER: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a bar's timestamp in the local timezone.
pub fn local_time(bar: &Bar) -> Option<String> {
    bar.datetime()
        .map(|utc| DateTime::<Local>::from(utc).format(LOCAL_TIME_FORMAT).to_string())
}

/// Writes `series` as CSV into `writer`. Returns the number of data rows.
pub fn write_csv<W: Write>(writer: W, series: &BarSeries) -> Result<usize, SinkError> {
    let mut wtr = ::csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER).context(CsvSnafu)?;
    for bar in &series.bars {
        let time = local_time(bar).with_context(|| ConversionSnafu {
            message: format!("timestamp {} is out of range", bar.timestamp),
        })?;
        wtr.write_record([
            time,
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ])
        .context(CsvSnafu)?;
    }
    wtr.flush().context(IoSnafu)?;
    Ok(series.len())
}

/// Writes each series to `<dir>/<file_name>`.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    dir: PathBuf,
    file_name: String,
}

impl CsvFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file_name: "kline_data.csv".to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Writes `series` to `path`, creating parent directories as needed.
pub fn write_csv_file(path: &Path, series: &BarSeries) -> Result<usize, SinkError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(IoSnafu)?;
    }
    let file = File::create(path).context(IoSnafu)?;
    let rows = write_csv(file, series)?;
    info!(path = %path.display(), rows, "exported series to CSV");
    Ok(rows)
}

#[async_trait]
impl DataSink for CsvFileSink {
    type Output = PathBuf;

    async fn write(&self, series: &BarSeries) -> Result<PathBuf, SinkError> {
        let path = self.path();
        write_csv_file(&path, series)?;
        Ok(path)
    }
}
