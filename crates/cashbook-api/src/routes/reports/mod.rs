//! Report routes

pub mod api;

pub use api::{balance_history, daily_series, distribution, summary, DateQuery, HistoryQuery};
