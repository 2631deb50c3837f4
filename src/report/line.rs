//! Typed field extraction for a single line of each report section.
//!
//! Every function returns `None` when the line does not have the expected
//! shape; the parser turns that into an `InvalidLine` error with context.

use crate::types::{canonical_metric_name, HistogramBucket, LatencyPercentile, SummaryMetric, Unit};

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `Requests/sec:	378.8461` or `Total:	0.5279 secs`.
pub fn parse_summary_line(line: &str) -> Option<SummaryMetric> {
    let (label, rest) = line.split_once(':')?;
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let mut tokens = rest.split_whitespace();
    let raw_value = tokens.next()?;
    let value = parse_finite(raw_value)?;
    let suffix = tokens.collect::<Vec<_>>().join(" ");
    let unit = Unit::from_suffix(&suffix)?;

    Some(SummaryMetric {
        name: canonical_metric_name(label),
        label: label.to_lowercase(),
        value,
        unit,
        raw_value: raw_value.to_string(),
    })
}

/// Splits `[<inner>] <rest>` into its two halves.
fn split_bracketed(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix('[')?;
    let (inner, rest) = rest.split_once(']')?;
    Some((inner.trim(), rest.trim()))
}

/// `[200]	42 responses` -> `("200", 42)`.
pub fn parse_status_line(line: &str) -> Option<(String, u64)> {
    let (code, rest) = split_bracketed(line)?;
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = rest.split_whitespace().next()?.parse::<u64>().ok()?;
    Some((code.to_string(), count))
}

/// `[3]	Get http://host/: connection refused` -> `("Get http://host/: connection refused", 3)`.
pub fn parse_error_line(line: &str) -> Option<(String, u64)> {
    let (count, message) = split_bracketed(line)?;
    let count = count.parse::<u64>().ok()?;
    if message.is_empty() {
        return None;
    }
    Some((message.to_string(), count))
}

/// `0.010 [123]	|■■■■■`; the bar is ignored.
pub fn parse_histogram_line(line: &str) -> Option<HistogramBucket> {
    let (bucket, rest) = line.trim().split_once('[')?;
    let raw_upper_bound = bucket.trim();
    let upper_bound = parse_finite(raw_upper_bound)?;
    let (count, _bar) = rest.split_once(']')?;
    let count = count.trim().parse::<u64>().ok()?;
    Some(HistogramBucket {
        upper_bound,
        count,
        raw_upper_bound: raw_upper_bound.to_string(),
    })
}

/// `10% in 0.0012 secs`.
pub fn parse_latency_line(line: &str) -> Option<LatencyPercentile> {
    let (percentile, rest) = line.trim().split_once('%')?;
    let percentile = percentile.trim().parse::<u8>().ok().filter(|p| *p <= 100)?;

    let rest = rest.trim_start().strip_prefix("in")?;
    let mut tokens = rest.split_whitespace();
    let raw_latency = tokens.next()?;
    let latency = parse_finite(raw_latency)?;
    match tokens.next() {
        None => {}
        Some(suffix) if Unit::from_suffix(suffix) == Some(Unit::Seconds) => {}
        Some(_) => return None,
    }

    Some(LatencyPercentile {
        percentile,
        latency,
        raw_latency: raw_latency.to_string(),
    })
}
