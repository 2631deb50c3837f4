use cmsbench::error::BenchError;
use cmsbench::types::BenchmarkReport;

/// Assert that percentiles in the latency distribution never decrease.
pub fn assert_percentiles_non_decreasing(report: &BenchmarkReport) {
    let percentiles: Vec<u8> = report
        .latency_distribution
        .iter()
        .map(|p| p.percentile)
        .collect();
    assert!(
        percentiles.windows(2).all(|w| w[0] <= w[1]),
        "latency percentiles are not non-decreasing: {percentiles:?}"
    );
}

/// Assert that a summary metric exists with the expected value.
pub fn assert_summary_value(report: &BenchmarkReport, name: &str, expected: f64) {
    let value = report
        .summary_value(name)
        .unwrap_or_else(|| panic!("summary metric '{name}' missing from {:?}", report.summary));
    assert!(
        (value - expected).abs() < 1e-9,
        "summary metric '{name}' = {value}, expected {expected}"
    );
}

/// Assert that the error is a MalformedReport naming the expected sentinel.
pub fn assert_malformed(err: &BenchError, expected_sentinel: &str) {
    match err {
        BenchError::MalformedReport { expected, .. } => assert_eq!(
            *expected, expected_sentinel,
            "malformed report names the wrong sentinel"
        ),
        other => panic!("expected MalformedReport, got: {other}"),
    }
}
