//! Range routes: consolidated read-only views and the consistency check

pub mod api;

pub use api::{check_consistency, get_range, RangeQuery, RangeResponse};
