use serde::Deserialize;

use crate::error::{BenchError, Result};

pub const DEFAULT_OUTPUT_PATH: &str = "/tmp/bench_results/result.json";
pub const DEFAULT_LABEL: &str = "Load Post";

/// Invocation-wide settings, built once and passed to each operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub run: RunConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Identifier of the host that ran the benchmark.
    pub hostname: String,
    /// Scenario label the results are filed under.
    pub label: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            pretty: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load config from an optional TOML file, then apply `CMSBENCH_*` environment overrides.
    ///
    /// Without an explicit path, `CMSBENCH_CONFIG` names the file; with neither,
    /// defaults are used.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path
            .map(str::to_string)
            .or_else(|| std::env::var("CMSBENCH_CONFIG").ok());

        let contents = match path {
            Some(p) => Some(std::fs::read_to_string(&p).map_err(|e| {
                BenchError::Config(format!("failed to read config file {p}: {e}"))
            })?),
            None => None,
        };

        let mut config = Self::load_with(contents.as_deref(), |key| std::env::var(key).ok())?;
        if config.run.hostname.is_empty() {
            config.run.hostname = detect_hostname();
        }
        config.validate()?;
        Ok(config)
    }

    /// Build a config from TOML contents and an environment lookup, without validating.
    pub fn load_with(
        contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config: Config = match contents {
            Some(c) => toml::from_str(c)?,
            None => Config::default(),
        };

        if let Some(v) = env("CMSBENCH_HOSTNAME") {
            config.run.hostname = v;
        }
        if let Some(v) = env("CMSBENCH_LABEL") {
            config.run.label = v;
        }
        if let Some(v) = env("CMSBENCH_OUTPUT_PATH") {
            config.output.path = v;
        }
        if let Some(v) = env("CMSBENCH_OUTPUT_PRETTY") {
            config.output.pretty = parse_bool("CMSBENCH_OUTPUT_PRETTY", &v)?;
        }
        if let Some(v) = env("CMSBENCH_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Some(v) = env("CMSBENCH_LOG_FORMAT") {
            config.logging.format = v;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.run.hostname.trim().is_empty() {
            return Err(BenchError::Config("run.hostname must not be empty".into()));
        }
        if self.run.label.trim().is_empty() {
            return Err(BenchError::Config("run.label must not be empty".into()));
        }
        if self.output.path.trim().is_empty() {
            return Err(BenchError::Config("output.path must not be empty".into()));
        }
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(BenchError::Config(format!(
                "logging.format must be \"text\" or \"json\", got \"{other}\""
            ))),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BenchError::Config(format!("{key}: expected a boolean, got \"{value}\""))),
    }
}

/// Name the OS reports for this machine, falling back to `$HOSTNAME`, then `"localhost"`.
pub fn detect_hostname() -> String {
    let os = match whoami::hostname() {
        Ok(name) => Some(name),
        Err(e) => {
            tracing::warn!(error = %e, "failed to query OS hostname");
            None
        }
    };
    resolve_hostname(os, std::env::var("HOSTNAME").ok())
}

/// First non-blank of the OS hostname and the environment value, else `"localhost"`.
pub fn resolve_hostname(os: Option<String>, env: Option<String>) -> String {
    [os, env]
        .into_iter()
        .flatten()
        .map(|h| h.trim().to_string())
        .find(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}
