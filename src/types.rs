use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unit implied by the suffix of a summary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Seconds,
    Bytes,
    Unitless,
}

impl Unit {
    /// Map a value suffix as printed by the load tool to a unit.
    pub fn from_suffix(suffix: &str) -> Option<Unit> {
        // older builds end the line with a period ("secs.")
        let suffix = suffix.trim().trim_end_matches('.').trim_end();
        match suffix.to_ascii_lowercase().as_str() {
            "" => Some(Unit::Unitless),
            "secs" | "sec" | "s" => Some(Unit::Seconds),
            "bytes" | "byte" => Some(Unit::Bytes),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Seconds => write!(f, "secs"),
            Unit::Bytes => write!(f, "bytes"),
            Unit::Unitless => write!(f, ""),
        }
    }
}

/// Report section, in the order they appear in the tool's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    StatusDistribution,
    Histogram,
    LatencyDistribution,
    ErrorDistribution,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::StatusDistribution => "status_distribution",
            Section::Histogram => "histogram",
            Section::LatencyDistribution => "latency_distribution",
            Section::ErrorDistribution => "error_distribution",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the summary table, e.g. `Requests/sec: 378.8461`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetric {
    /// Canonical metric name (`"requests per second"`).
    pub name: String,
    /// Label as printed by the tool, lower-cased (`"requests/sec"`).
    pub label: String,
    pub value: f64,
    pub unit: Unit,
    /// Value exactly as printed (`"0.1000"`), kept for the legacy result lines.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_value: String,
}

/// A response-time histogram bucket: requests that completed within `upper_bound` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub upper_bound: f64,
    pub count: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_upper_bound: String,
}

/// `percentile`% of requests completed within `latency` seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyPercentile {
    pub percentile: u8,
    pub latency: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_latency: String,
}

/// Structured form of one load-tool report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub summary: Vec<SummaryMetric>,
    /// Status code (`"200"`) or error message mapped to its occurrence count.
    pub status_or_error_distribution: BTreeMap<String, u64>,
    pub histogram: Vec<HistogramBucket>,
    pub latency_distribution: Vec<LatencyPercentile>,
}

impl BenchmarkReport {
    /// Look up a summary value by canonical metric name.
    pub fn summary_value(&self, name: &str) -> Option<f64> {
        self.summary
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }

    /// Total number of requests recorded in the histogram.
    pub fn total_requests(&self) -> u64 {
        self.histogram.iter().map(|b| b.count).sum()
    }

    /// Latency for an exact percentile, if the tool reported it.
    pub fn latency_at(&self, percentile: u8) -> Option<f64> {
        self.latency_distribution
            .iter()
            .find(|p| p.percentile == percentile)
            .map(|p| p.latency)
    }
}

/// Canonical name for a summary label as printed by the load tool.
pub fn canonical_metric_name(label: &str) -> String {
    let label = label.trim().to_lowercase();
    match label.as_str() {
        "total" => "total time".to_string(),
        "requests/sec" => "requests per second".to_string(),
        "size/request" => "size per request".to_string(),
        _ => label,
    }
}
