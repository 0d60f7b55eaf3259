pub mod api;

pub use api::{clear, list};
