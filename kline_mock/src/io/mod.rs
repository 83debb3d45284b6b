//! Writing series out of the process.

pub mod csv;
pub mod sink;

pub use self::csv::{CsvFileSink, write_csv, write_csv_file};
pub use sink::{DataSink, SinkError};
