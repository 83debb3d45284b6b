use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::bar_series::BarSeries;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The encoder failed while writing a record.
    #[snafu(display("Failed to write CSV data: {source}"))]
    Csv {
        source: ::csv::Error,
        backtrace: Backtrace,
    },

    /// A bar could not be converted into the destination format (e.g. a
    /// timestamp outside the representable date range).
    #[snafu(display("Data conversion error: {message}"))]
    Conversion {
        message: String,
        backtrace: Backtrace,
    },

    /// A generic I/O error.
    #[snafu(display("I/O error: {source}"))]
    Io {
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink {
    /// The type of output returned after a successful write operation.
    ///
    /// A file sink returns the path it wrote; an in-memory sink might return
    /// the number of rows.
    type Output;

    /// Writes one series to the destination.
    async fn write(&self, series: &BarSeries) -> Result<Self::Output, SinkError>;
}
