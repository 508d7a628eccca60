//! Utility functions

pub mod common;

pub use common::{format_timestamp, parse_timestamp, DB_DATE_FORMAT};
