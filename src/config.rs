//! Parsers for CLI option values.

mod duration;

pub use duration::{parse_delimiter, parse_duration, parse_duration_to_secs};
