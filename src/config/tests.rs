use std::io::Write;

use serial_test::serial;

use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.eventstore.mode, ContextMode::MultiTenant);
    assert_eq!(config.eventstore.connection_string, DEFAULT_CONNECTION_STRING);
    assert!(config.tenants.is_empty());
    assert_eq!(config.health.stream, "$users");
    assert_eq!(config.health.failure_status, HealthStatus::Unhealthy);
    assert!(config.health.resolve_link_tos);
}

#[test]
fn test_from_yaml() {
    let config = Config::from_yaml(
        r#"
eventstore:
  mode: fixed
  connection_string: "esdb://single:2113?tls=false"
tenants:
  acme: "esdb://acme:2113"
  globex: "esdb://globex:2113"
health:
  username: admin
  password: changeit
  failure_status: degraded
"#,
    )
    .unwrap();

    assert_eq!(config.eventstore.mode, ContextMode::Fixed);
    assert_eq!(
        config.eventstore.connection_string,
        "esdb://single:2113?tls=false"
    );
    assert_eq!(config.tenants.len(), 2);
    assert_eq!(config.tenants["acme"], "esdb://acme:2113");
    assert_eq!(config.health.username.as_deref(), Some("admin"));
    assert_eq!(config.health.failure_status, HealthStatus::Degraded);
    assert_eq!(config.health.stream, "$users");
}

#[test]
fn test_from_yaml_rejects_unknown_mode() {
    assert!(Config::from_yaml("eventstore:\n  mode: sharded\n").is_err());
}

#[test]
#[serial]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "eventstore:\n  mode: multi_tenant\ntenants:\n  acme: \"esdb://acme:2113\"\nhealth:\n  stream: \"$streams\""
    )
    .unwrap();

    let config = Config::load(file.path().to_str()).unwrap();

    assert_eq!(config.eventstore.mode, ContextMode::MultiTenant);
    assert_eq!(config.tenants["acme"], "esdb://acme:2113");
    assert_eq!(config.health.stream, "$streams");
}

#[test]
#[serial]
fn test_load_missing_explicit_file_fails() {
    let err = Config::load(Some("/nonexistent/es-context.yaml")).unwrap_err();
    assert!(err.to_string().starts_with("Failed to load configuration"));
}

#[test]
#[serial]
fn test_env_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "eventstore:\n  mode: multi_tenant").unwrap();

    std::env::set_var("ES_CONTEXT__EVENTSTORE__MODE", "fixed");
    let config = Config::load(file.path().to_str());
    std::env::remove_var("ES_CONTEXT__EVENTSTORE__MODE");

    assert_eq!(config.unwrap().eventstore.mode, ContextMode::Fixed);
}
