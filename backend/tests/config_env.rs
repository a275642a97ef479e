mod support;

use std::path::PathBuf;

use mvmapper::storage::ServerConfig;
use support::with_scoped_env;

const VARS: [&str; 10] = [
    "HOST",
    "PORT",
    "DATA_DIR",
    "STATIC_DIR",
    "FAVICON",
    "HELP_PAGE",
    "DEFAULT_DATA",
    "JITTER_SEED",
    "MAX_UPLOAD_BYTES",
    "SESSION_TTL_SECS",
];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    VARS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_from_env_defaults() {
    let config = with_scoped_env(&cleared(), ServerConfig::from_env).unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.default_data, "demo.csv");
    assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
}

#[test]
fn test_from_env_overrides() {
    let mut env = cleared();
    env.extend([
        ("HOST", Some("127.0.0.1")),
        ("PORT", Some("5006")),
        ("DATA_DIR", Some("/var/lib/mvmapper")),
        ("JITTER_SEED", Some("1234")),
        ("MAX_UPLOAD_BYTES", Some("1024")),
        ("SESSION_TTL_SECS", Some("600")),
    ]);
    let config = with_scoped_env(&env, ServerConfig::from_env).unwrap();

    assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:5006");
    assert_eq!(config.data_dir, PathBuf::from("/var/lib/mvmapper"));
    assert_eq!(config.jitter_seed, Some(1234));
    assert_eq!(config.max_upload_bytes, 1024);
    assert_eq!(config.session_ttl_secs, 600);
}

#[test]
fn test_from_env_invalid_port() {
    let mut env = cleared();
    env.push(("PORT", Some("70000")));
    let err = with_scoped_env(&env, ServerConfig::from_env).unwrap_err();
    assert!(err.contains("PORT"));
}
