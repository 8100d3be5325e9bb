use super::*;
use crate::schema::ServerConfig;

#[test]
fn default_config_is_valid() {
    assert!(validate(&PairlineConfig::default()).is_ok());
}

#[test]
fn privileged_port_is_rejected() {
    let mut config = PairlineConfig::default();
    config.server.port = 80;

    let err = validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));
    assert!(err.to_string().contains("server.port = 80"));
}

#[test]
fn all_errors_are_collected() {
    let config = PairlineConfig {
        server: ServerConfig {
            host: "  ".into(),
            port: 22,
        },
        ..Default::default()
    };

    let msg = validate(&config).unwrap_err().to_string();
    assert!(msg.contains("server.host"));
    assert!(msg.contains("server.port"));
    assert!(msg.contains("; "));
}
