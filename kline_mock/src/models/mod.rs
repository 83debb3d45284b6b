pub mod bar;
pub mod bar_series;
pub mod book;
pub mod interval;
pub mod period;
