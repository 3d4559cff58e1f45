use std::fs;

use clock12::{ClockConfig, ConfigError, Simulator};

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clock12.toml");
    fs::write(
        &path,
        r#"
        system_clock_hz = 1_000
        "#,
    )
    .unwrap();

    let config = ClockConfig::load(&path).unwrap();
    assert_eq!(config.system_clock_hz, 1_000);
    assert_eq!(config.divider_wrap, None);
    assert_eq!(config.divider_wrap().unwrap().get(), 4_000);
    assert_eq!(config.clock_period_ns().unwrap(), 1_000_000);

    let sim = Simulator::builder().config(config).build().unwrap();
    let clk_div = sim.signal("clk_div").unwrap();
    assert_eq!(clk_div.width, 12);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClockConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_empty_file_is_default() {
    assert_eq!(ClockConfig::from_toml_str("").unwrap(), ClockConfig::default());
}

#[test]
fn test_type_mismatch_is_a_parse_error() {
    let err = ClockConfig::from_toml_str("divider_wrap = \"four\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_round_trips_through_toml() {
    let config = ClockConfig {
        system_clock_hz: 48_000_000,
        divider_wrap: Some(16),
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(ClockConfig::from_toml_str(&text).unwrap(), config);
}
