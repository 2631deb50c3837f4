//! Parser for the text report printed by the `hey` load generator.

pub mod line;
pub mod parser;

pub use parser::{parse_report, parse_reports, ReportParser};

/// Printed once all requests of a run have completed; starts a report.
pub const ALL_REQUESTS_DONE: &str = "All requests done.";
pub const STATUS_CODE_DISTRIBUTION: &str = "Status code distribution:";
pub const RESPONSE_TIME_HISTOGRAM: &str = "Response time histogram:";
pub const LATENCY_DISTRIBUTION: &str = "Latency distribution:";
pub const ERROR_DISTRIBUTION: &str = "Error distribution:";

const SENTINELS: [&str; 5] = [
    ALL_REQUESTS_DONE,
    STATUS_CODE_DISTRIBUTION,
    RESPONSE_TIME_HISTOGRAM,
    LATENCY_DISTRIBUTION,
    ERROR_DISTRIBUTION,
];

/// Case-insensitive sentinel comparison, ignoring surrounding whitespace.
pub fn is_sentinel(line: &str, sentinel: &str) -> bool {
    line.trim().eq_ignore_ascii_case(sentinel)
}

/// Returns the sentinel this line is, if any.
pub fn which_sentinel(line: &str) -> Option<&'static str> {
    SENTINELS.iter().copied().find(|s| is_sentinel(line, s))
}
