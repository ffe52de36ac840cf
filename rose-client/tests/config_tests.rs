use std::collections::HashMap;
use std::sync::Arc;

use rose_client::{
    BASE_URL_VAR, ClientConfig, ClientError, HttpTransport, RoseClient, TIMEOUT_VAR,
    TransportError,
};
use rose_model::TypeRegistry;
use rose_types::ErrorKind;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ── Defaults ────────────────────────────────────────────────────

#[test]
fn config_default() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.base_url, "http://localhost:4053");
    assert_eq!(cfg.timeout_secs, 30);
    assert!(cfg.user_agent.starts_with("rose-client/"));
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_serde_roundtrip() {
    let cfg = ClientConfig {
        base_url: "https://rose.example.org/api".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let back: ClientConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn config_missing_fields_take_defaults() {
    let cfg: ClientConfig = serde_json::from_str(r#"{"timeout_secs":5}"#).unwrap();
    assert_eq!(cfg.timeout_secs, 5);
    assert_eq!(cfg.base_url, "http://localhost:4053");
}

// ── Environment overrides ───────────────────────────────────────

#[test]
fn lookup_without_variables_gives_defaults() {
    let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, ClientConfig::default());
}

#[test]
fn lookup_overrides_url_and_timeout() {
    let cfg = ClientConfig::from_lookup(lookup(&[
        (BASE_URL_VAR, "https://rose.internal:8443"),
        (TIMEOUT_VAR, " 12 "),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://rose.internal:8443");
    assert_eq!(cfg.timeout_secs, 12);
}

#[test]
fn lookup_rejects_bad_timeout() {
    let err = ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
    assert!(matches!(err, TransportError::Config(_)));
}

#[test]
fn lookup_rejects_zero_timeout() {
    assert!(ClientConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).is_err());
}

#[test]
fn lookup_rejects_non_http_url() {
    let err = ClientConfig::from_lookup(lookup(&[(BASE_URL_VAR, "ftp://rose")])).unwrap_err();
    assert!(err.to_string().contains("ftp://rose"));
}

// ── Transport construction ──────────────────────────────────────

#[test]
fn http_transport_validates_config() {
    let bad = ClientConfig {
        base_url: "localhost".to_string(),
        ..Default::default()
    };
    assert!(HttpTransport::new(bad).is_err());

    let transport = HttpTransport::new(ClientConfig::default()).unwrap();
    assert_eq!(transport.config().timeout_secs, 30);
}

#[test]
fn connect_with_bad_config_is_config_error() {
    let bad = ClientConfig {
        timeout_secs: 0,
        ..Default::default()
    };
    let err = match RoseClient::connect(bad, Arc::new(TypeRegistry::new())) {
        Ok(_) => panic!("connect accepted a zero timeout"),
        Err(err) => err,
    };
    assert!(matches!(err, ClientError::Config(TransportError::Config(_))));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.method(), None);
}
