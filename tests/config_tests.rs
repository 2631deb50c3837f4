use std::collections::HashMap;

use cmsbench::config::{
    detect_hostname, resolve_hostname, Config, DEFAULT_LABEL, DEFAULT_OUTPUT_PATH,
};
use cmsbench::error::BenchError;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::load_with(None, env_from(&[])).unwrap();
    assert_eq!(config.run.label, DEFAULT_LABEL);
    assert_eq!(config.output.path, DEFAULT_OUTPUT_PATH);
    assert!(!config.output.pretty);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, "text");
    assert!(config.run.hostname.is_empty(), "hostname is filled in by load()");
}

#[test]
fn test_toml_file_sections() {
    let toml = r#"
        [run]
        hostname = "wp-bench-3"
        label = "Load Page"

        [output]
        path = "/var/tmp/out.json"
        pretty = true

        [logging]
        format = "json"
    "#;
    let config = Config::load_with(Some(toml), env_from(&[])).unwrap();

    assert_eq!(config.run.hostname, "wp-bench-3");
    assert_eq!(config.run.label, "Load Page");
    assert_eq!(config.output.path, "/var/tmp/out.json");
    assert!(config.output.pretty);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.level, "info", "unset keys keep their defaults");
    config.validate().unwrap();
}

#[test]
fn test_env_overrides_file() {
    let toml = "[run]\nhostname = \"from-file\"\n";
    let env = env_from(&[
        ("CMSBENCH_HOSTNAME", "from-env"),
        ("CMSBENCH_LABEL", "Get Blog Post"),
        ("CMSBENCH_OUTPUT_PATH", "/tmp/x.json"),
        ("CMSBENCH_OUTPUT_PRETTY", "yes"),
        ("CMSBENCH_LOG_LEVEL", "debug"),
    ]);
    let config = Config::load_with(Some(toml), env).unwrap();

    assert_eq!(config.run.hostname, "from-env");
    assert_eq!(config.run.label, "Get Blog Post");
    assert_eq!(config.output.path, "/tmp/x.json");
    assert!(config.output.pretty);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_bad_bool_override() {
    let err = Config::load_with(None, env_from(&[("CMSBENCH_OUTPUT_PRETTY", "maybe")]))
        .unwrap_err();
    assert!(matches!(err, BenchError::Config(_)), "got: {err}");
}

#[test]
fn test_invalid_toml() {
    let err = Config::load_with(Some("[run\nlabel = 1"), env_from(&[])).unwrap_err();
    assert!(matches!(err, BenchError::Toml(_)), "got: {err}");
}

#[test]
fn test_validate_rejects_empty_fields() {
    let mut config = Config::load_with(None, env_from(&[("CMSBENCH_HOSTNAME", "h")])).unwrap();
    config.validate().unwrap();

    config.run.label = "  ".to_string();
    assert!(matches!(config.validate(), Err(BenchError::Config(_))));

    config.run.label = "Load Post".to_string();
    config.run.hostname.clear();
    assert!(matches!(config.validate(), Err(BenchError::Config(_))));
}

#[test]
fn test_validate_rejects_unknown_log_format() {
    let config = Config::load_with(
        None,
        env_from(&[("CMSBENCH_HOSTNAME", "h"), ("CMSBENCH_LOG_FORMAT", "xml")]),
    )
    .unwrap();
    assert!(matches!(config.validate(), Err(BenchError::Config(_))));
}

#[test]
fn test_load_missing_file_is_config_error() {
    let err = Config::load(Some("/nonexistent/cmsbench.toml")).unwrap_err();
    assert!(matches!(err, BenchError::Config(_)), "got: {err}");
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("cmsbench.toml");
    std::fs::write(&path, "[run]\nhostname = \"file-host\"\nlabel = \"Load Post\"\n").unwrap();

    let config = Config::load(Some(path.to_str().unwrap())).unwrap();
    // CMSBENCH_HOSTNAME may be set in the environment running the tests
    assert!(!config.run.hostname.is_empty());
}

#[test]
fn test_hostname_prefers_os_name() {
    let name = resolve_hostname(Some("wp-bench-1".into()), Some("from-env".into()));
    assert_eq!(name, "wp-bench-1");
}

#[test]
fn test_hostname_falls_back_to_env_then_localhost() {
    assert_eq!(resolve_hostname(None, Some(" from-env\n".into())), "from-env");
    assert_eq!(resolve_hostname(Some("  ".into()), Some("from-env".into())), "from-env");
    assert_eq!(resolve_hostname(None, Some(String::new())), "localhost");
    assert_eq!(resolve_hostname(None, None), "localhost");
}

#[test]
fn test_detect_hostname_not_blank() {
    let name = detect_hostname();
    assert!(!name.trim().is_empty(), "detected hostname should not be blank");
}
