use std::collections::HashMap;

use cutandgo_api::config::ApiConfig;
use pretty_assertions::assert_eq;
use tracing::Level;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

const REQUIRED: [(&str, &str); 2] = [
    ("DATABASE_URL", "postgres://localhost/cutandgo"),
    ("JWT_SECRET", "secret"),
];

#[test]
fn test_defaults() {
    let config = ApiConfig::from_lookup(lookup(&REQUIRED)).unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.cors_origins, None);
    assert_eq!(config.jwt.issuer, "cutandgo");
    assert_eq!(config.jwt.audience, "cutandgo-clients");
    assert_eq!(config.jwt.expiration_minutes, 60);
    assert_eq!(config.request_timeout, 30);
}

#[test]
fn test_overrides() {
    let mut vars = REQUIRED.to_vec();
    vars.extend([
        ("API_HOST", "127.0.0.1"),
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://localhost:5173, https://cutandgo.app,"),
        ("JWT_EXPIRATION_MINUTES", "15"),
    ]);

    let config = ApiConfig::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.server_addr(), "127.0.0.1:8080");
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec![
            "http://localhost:5173".to_string(),
            "https://cutandgo.app".to_string()
        ])
    );
    assert_eq!(config.jwt.expiration_minutes, 15);
}

#[test]
fn test_missing_database_url() {
    let result = ApiConfig::from_lookup(lookup(&[("JWT_SECRET", "secret")]));

    assert!(result.unwrap_err().to_string().contains("DATABASE_URL"));
}

#[test]
fn test_missing_or_empty_secret() {
    let missing = ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/cutandgo")]));
    let empty = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/cutandgo"),
        ("JWT_SECRET", ""),
    ]));

    assert!(missing.unwrap_err().to_string().contains("JWT_SECRET"));
    assert!(empty.is_err());
}

#[test]
fn test_rejects_bad_numbers() {
    let mut bad_port = REQUIRED.to_vec();
    bad_port.push(("API_PORT", "http"));
    let mut zero_expiry = REQUIRED.to_vec();
    zero_expiry.push(("JWT_EXPIRATION_MINUTES", "0"));

    assert!(ApiConfig::from_lookup(lookup(&bad_port)).is_err());
    assert!(ApiConfig::from_lookup(lookup(&zero_expiry)).is_err());
}
