//! Result document written for the aggregation step.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::{Config, RunConfig};
use crate::error::Result;
use crate::metrics;
use crate::report::parse_reports;
use crate::types::BenchmarkReport;

/// Results collected under one scenario label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResults {
    /// Legacy CSV-like lines (`"total,0.5279"`), consumed by existing tooling.
    #[serde(rename = "Results", default)]
    pub results: Vec<String>,
    #[serde(rename = "Reports", default, skip_serializing_if = "Vec::is_empty")]
    pub reports: Vec<BenchmarkReport>,
}

/// Top-level result file: `{"hostname": ..., "results": {<label>: {"Results": [...]}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub results: BTreeMap<String, ScenarioResults>,
}

impl ResultDocument {
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
            results: BTreeMap::new(),
        }
    }

    /// Append reports under `label`, extending any results already recorded there.
    pub fn add_reports(&mut self, label: &str, reports: Vec<BenchmarkReport>) {
        let entry = self.results.entry(label.to_string()).or_default();
        for report in &reports {
            entry.results.extend(legacy_lines(report));
        }
        entry.reports.extend(reports);
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the document to `path`, replacing any previous file atomically.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn write(&self, path: &Path, pretty: bool) -> Result<()> {
        let outcome = self.write_inner(path, pretty).await;
        let status = if outcome.is_ok() { "ok" } else { "error" };
        metrics::RESULT_WRITES_TOTAL
            .with_label_values(&[status])
            .inc();
        outcome
    }

    async fn write_inner(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, json.as_bytes()).await?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        info!(bytes = json.len(), labels = self.results.len(), "result document written");
        Ok(())
    }

    pub async fn read(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

/// Parse `text` and file its reports under the configured host and label.
pub fn build_document(text: &str, run: &RunConfig) -> Result<ResultDocument> {
    let reports = parse_reports(text)?;
    info!(count = reports.len(), label = %run.label, "parsed load-test reports");

    let mut doc = ResultDocument::new(&run.hostname);
    doc.add_reports(&run.label, reports);
    Ok(doc)
}

/// Parse `text` and write the result document to the configured output path.
///
/// The file is only touched once every report has parsed.
pub async fn record_run(text: &str, config: &Config) -> Result<ResultDocument> {
    let doc = build_document(text, &config.run)?;
    doc.write(Path::new(&config.output.path), config.output.pretty)
        .await?;
    Ok(doc)
}

/// Render a report as the legacy `field,value` lines: summary, then histogram,
/// then latency distribution. Numbers keep the text the tool printed when known.
pub fn legacy_lines(report: &BenchmarkReport) -> Vec<String> {
    let summary = report.summary.iter().map(|m| {
        let field: String = m.label.split_whitespace().collect();
        format!("{field},{}", number_text(&m.raw_value, m.value))
    });
    let histogram = report
        .histogram
        .iter()
        .map(|b| format!("{},{}", number_text(&b.raw_upper_bound, b.upper_bound), b.count));
    let latency = report
        .latency_distribution
        .iter()
        .map(|p| format!("{},{}", p.percentile, number_text(&p.raw_latency, p.latency)));

    summary.chain(histogram).chain(latency).collect()
}

fn number_text(raw: &str, value: f64) -> String {
    if raw.is_empty() {
        value.to_string()
    } else {
        raw.to_string()
    }
}
