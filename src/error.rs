use thiserror::Error;

use crate::types::Section;

#[derive(Error, Debug)]
pub enum BenchError {
    // Parse errors
    #[error("input contains no load-test report")]
    EmptyInput,

    #[error("malformed report: expected '{expected}' before line {line}")]
    MalformedReport { expected: &'static str, line: usize },

    #[error("invalid {section} line {line}: {content:?}")]
    InvalidLine {
        section: Section,
        line: usize,
        content: String,
    },

    // Serialization errors
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // Config errors
    #[error("config error: {0}")]
    Config(String),

    // IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BenchError::EmptyInput => "empty_input",
            BenchError::MalformedReport { .. } => "malformed_report",
            BenchError::InvalidLine { .. } => "invalid_line",
            BenchError::Json(_) => "json",
            BenchError::Toml(_) => "toml",
            BenchError::Config(_) => "config",
            BenchError::Io(_) => "io",
        }
    }

    /// Whether the error came from the report text itself rather than the environment.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            BenchError::EmptyInput
                | BenchError::MalformedReport { .. }
                | BenchError::InvalidLine { .. }
        )
    }
}
