//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{ConfigLoader, SqueezeConfig, Validate};
use crate::data_structures::Alphabet;
use crate::error::config::ConfigError;
use std::fs;
use tempfile::tempdir;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = SqueezeConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.trie.alphabet, Alphabet::Unicode);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = SqueezeConfig::default();

    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    config.snapshot.extension = String::new();
    assert!(config.validate().is_err());

    config.snapshot.extension = "snap".to_string();
    assert!(config.validate().is_ok());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    std::env::remove_var("TEST_FILE__TRIE__ALPHABET");

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config_file_test.toml");

    let config_content = r#"
    [trie]
    alphabet = "byte"

    [snapshot]
    pretty = true
    "#;

    fs::write(&config_path, config_content).unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(config.trie.alphabet, Alphabet::Byte);
    assert!(config.snapshot.pretty);

    // Other values should be defaults
    assert_eq!(config.snapshot.extension, "trie");
    assert_eq!(config.log.level, "info");
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_config_from_json() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "log": { "level": "warn", "json": true } }"#).unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_JSON").load().unwrap();
    assert_eq!(config.log.level, "warn");
    assert!(config.log.json);
}

/// Test that environment variables override file values.
#[test]
fn test_env_overrides() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config_env_test.toml");
    fs::write(&config_path, "[snapshot]\nextension = \"from-file\"\n").unwrap();

    std::env::set_var("TEST_ENV__SNAPSHOT__EXTENSION", "from-env");
    std::env::set_var("TEST_ENV__TRIE__ALPHABET", "ascii");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENV");
    let config = loader.load();

    std::env::remove_var("TEST_ENV__SNAPSHOT__EXTENSION");
    std::env::remove_var("TEST_ENV__TRIE__ALPHABET");

    let config = config.unwrap();
    assert_eq!(config.snapshot.extension, "from-env");
    assert_eq!(config.trie.alphabet, Alphabet::Ascii);
}

/// Test that loading a missing or invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    let err = ConfigLoader::new(Some(&missing), "TEST_MISSING").load().unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(path) if path == missing));

    let unsupported = dir.path().join("config.ini");
    fs::write(&unsupported, "level = info").unwrap();
    let err = ConfigLoader::new(Some(&unsupported), "TEST_INI").load().unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));

    let bad_level = dir.path().join("bad_level.toml");
    fs::write(&bad_level, "[log]\nlevel = \"loud\"\n").unwrap();
    let err = ConfigLoader::new(Some(&bad_level), "TEST_BAD_LEVEL").load().unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));

    let bad_alphabet = dir.path().join("bad_alphabet.toml");
    fs::write(&bad_alphabet, "[trie]\nalphabet = \"klingon\"\n").unwrap();
    let err = ConfigLoader::new(Some(&bad_alphabet), "TEST_BAD_ALPHABET").load().unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

/// Test that the generated default configuration parses back unchanged.
#[test]
fn test_default_config_toml_round_trip() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("generated.toml");
    let toml = toml::to_string_pretty(&SqueezeConfig::default()).unwrap();
    fs::write(&config_path, toml).unwrap();

    let loaded = ConfigLoader::new(Some(&config_path), "TEST_GENERATED").load().unwrap();
    assert_eq!(loaded, SqueezeConfig::default());
}
