use std::time::Duration;

use soccer_stats::{ApiError, ClientConfig, FootballApi};

// Port 9 (discard) is closed on loopback, so connects fail fast.
fn unreachable_api() -> FootballApi {
    FootballApi::new(&ClientConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_secs(2),
    })
    .expect("client should build")
}

#[test]
fn connection_failure_is_transient_network_error() {
    let err = unreachable_api().list_leagues("test-key").unwrap_err();
    assert!(matches!(err, ApiError::Network { ref path, .. } if path == "/leagues"));
    assert!(err.is_transient());
    assert!(!err.is_auth());
}

#[test]
fn malformed_key_never_reaches_the_wire() {
    let err = unreachable_api().list_leagues("bad\nkey").unwrap_err();
    assert!(err.is_auth());
    assert!(!err.is_transient());
}

#[test]
fn base_url_trailing_slash_is_dropped() {
    let api = FootballApi::new(&ClientConfig {
        base_url: "http://127.0.0.1:9/".to_string(),
        ..ClientConfig::default()
    })
    .unwrap();
    assert_eq!(api.transport().base_url(), "http://127.0.0.1:9");
}
