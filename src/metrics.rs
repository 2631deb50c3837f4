use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static::lazy_static! {
    pub static ref REPORTS_PARSED_TOTAL: IntCounter = register_int_counter!(
        "cmsbench_reports_parsed_total", "Load-test reports parsed"
    ).unwrap();
    pub static ref PARSE_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "cmsbench_parse_errors_total", "Report parse failures", &["kind"]
    ).unwrap();
    pub static ref SECTION_LINES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "cmsbench_section_lines_total", "Data lines parsed per report section", &["section"]
    ).unwrap();
    pub static ref RESULT_WRITES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "cmsbench_result_writes_total", "Result document writes", &["status"]
    ).unwrap();
}

pub fn init() {
    lazy_static::initialize(&REPORTS_PARSED_TOTAL);
    lazy_static::initialize(&PARSE_ERRORS_TOTAL);
    lazy_static::initialize(&SECTION_LINES_TOTAL);
    lazy_static::initialize(&RESULT_WRITES_TOTAL);
}

/// Text exposition of every registered metric.
pub fn render() -> String {
    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        tracing::warn!(error = %e, "failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
