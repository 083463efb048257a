use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_quill_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("QUILL_PORT");
        env::remove_var("QUILL_BIND_ADDR");
        env::remove_var("QUILL_MODEL_API_KEY");
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("QUILL_MODEL");
        env::remove_var("QUILL_MODEL_TIMEOUT_SECS");
        env::remove_var("QUILL_CACHE_ENABLED");
        env::remove_var("QUILL_CACHE_CAPACITY");
        env::remove_var("QUILL_CACHE_TTL_SECS");
        env::remove_var("QUILL_LEXICON_PATH");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert!(config.model_api_key.is_none());
    assert_eq!(config.model, "gpt-3.5-turbo");
    assert_eq!(config.model_timeout, Duration::from_secs(30));
    assert!(config.cache_enabled);
    assert_eq!(config.cache_capacity, 10_000);
    assert_eq!(config.cache_ttl, Duration::from_secs(86_400));
    assert!(config.lexicon_path.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_quill_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8080);
    assert!(!config.model_configured());
    assert!(config.cache_enabled);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_quill_env();

    let config = with_env_vars(
        &[
            ("QUILL_PORT", "9090"),
            ("QUILL_BIND_ADDR", "0.0.0.0"),
            ("QUILL_MODEL", "gpt-4o-mini"),
            ("QUILL_MODEL_TIMEOUT_SECS", "12"),
            ("QUILL_CACHE_CAPACITY", "500"),
            ("QUILL_CACHE_TTL_SECS", "60"),
        ],
        || Config::from_env().expect("should parse overrides"),
    );

    assert_eq!(config.port, 9090);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0");
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.model_timeout, Duration::from_secs(12));
    assert_eq!(config.cache_capacity, 500);
    assert_eq!(config.cache_ttl, Duration::from_secs(60));
}

#[test]
#[serial]
fn test_api_key_precedence() {
    clear_quill_env();

    let config = with_env_vars(
        &[
            ("QUILL_MODEL_API_KEY", "sk-quill"),
            ("OPENAI_API_KEY", "sk-openai"),
        ],
        || Config::from_env().unwrap(),
    );
    assert_eq!(config.model_api_key.as_deref(), Some("sk-quill"));

    let config = with_env_vars(&[("OPENAI_API_KEY", "sk-openai")], || {
        Config::from_env().unwrap()
    });
    assert_eq!(config.model_api_key.as_deref(), Some("sk-openai"));
}

#[test]
#[serial]
fn test_blank_api_key_is_absent() {
    clear_quill_env();

    let config = with_env_vars(&[("QUILL_MODEL_API_KEY", "   ")], || {
        Config::from_env().unwrap()
    });
    assert!(config.model_api_key.is_none());
}

#[test]
#[serial]
fn test_cache_disable_values() {
    clear_quill_env();

    for value in ["false", "0", "FALSE", "off"] {
        let config = with_env_vars(&[("QUILL_CACHE_ENABLED", value)], || {
            Config::from_env().unwrap()
        });
        assert!(!config.cache_enabled, "{} should disable the cache", value);
    }

    let config = with_env_vars(&[("QUILL_CACHE_ENABLED", "true")], || {
        Config::from_env().unwrap()
    });
    assert!(config.cache_enabled);
}

#[test]
#[serial]
fn test_invalid_port() {
    clear_quill_env();

    let err = with_env_vars(&[("QUILL_PORT", "0")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { .. }));

    let err = with_env_vars(&[("QUILL_PORT", "not-a-port")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::PortParseError { .. }));
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_quill_env();

    let err = with_env_vars(&[("QUILL_BIND_ADDR", "localhost:80")], Config::from_env).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
}

#[test]
#[serial]
fn test_invalid_timeout() {
    clear_quill_env();

    let err = with_env_vars(&[("QUILL_MODEL_TIMEOUT_SECS", "soon")], Config::from_env)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            name: "QUILL_MODEL_TIMEOUT_SECS",
            ..
        }
    ));
}

#[test]
fn test_validate_zero_timeout() {
    let config = Config {
        model_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_validate_zero_ttl_only_when_enabled() {
    let config = Config {
        cache_ttl: Duration::ZERO,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = Config {
        cache_ttl: Duration::ZERO,
        cache_enabled: false,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_lexicon_path() {
    let config = Config {
        lexicon_path: Some(PathBuf::from("/nonexistent/lexicon.json")),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        lexicon_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));
}

#[test]
fn test_debug_redacts_api_key() {
    let config = Config {
        model_api_key: Some("sk-live-very-secret".to_string()),
        ..Default::default()
    };
    let debug = format!("{:?}", config);
    assert!(!debug.contains("sk-live-very-secret"));
    assert!(debug.contains("<redacted>"));
}
