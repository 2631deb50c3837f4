//! cmsbench: turns `hey` load-test reports into structured benchmark results.

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod results;
pub mod types;
