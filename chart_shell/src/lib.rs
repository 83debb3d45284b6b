//! Glue between the mock K-line core and the chart widget.
//!
//! [`session::ChartSession`] is the single application-state object: it owns
//! the current series, the selected period, the cursor and the persisted
//! chart settings, and answers the widget's data and cursor callbacks.

pub mod config;
pub mod feed;
pub mod session;
pub mod settings;
pub mod widget;
