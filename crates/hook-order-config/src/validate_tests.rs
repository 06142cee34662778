use super::*;
use crate::config::FilesConfig;

#[test]
fn test_validate_config_succeeds_on_defaults() {
    assert!(validate_config(&HookOrderConfig::default()).is_ok());
}

#[test]
fn test_validate_config_accepts_aliases() {
    let mut config = HookOrderConfig::default();
    config.settings.global_aliases.insert("test", "it");
    config.settings.global_aliases.insert("test", "$spec");
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_validate_rejects_alias_equal_to_canonical() {
    let mut config = HookOrderConfig::default();
    config.settings.global_aliases.insert("test", "test");
    let err = validate_config(&config).unwrap_err();
    assert!(
        err.to_string().contains("repeats its canonical name"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_validate_rejects_non_identifier_alias() {
    for bad in ["", "my-test", "1st", "test.it"] {
        let mut config = HookOrderConfig::default();
        config.settings.global_aliases.insert("test", bad);
        let err = validate_config(&config).unwrap_err();
        assert!(
            err.to_string().contains("is not a valid identifier"),
            "alias {bad:?}: unexpected error: {err}"
        );
    }
}

#[test]
fn test_validate_rejects_dotted_extension() {
    let config = HookOrderConfig {
        files: FilesConfig {
            extensions: vec![".ts".to_string()],
            ..FilesConfig::default()
        },
        ..HookOrderConfig::default()
    };
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("must be a bare extension"));
}

#[test]
fn test_validate_rejects_empty_extension_list() {
    let config = HookOrderConfig {
        files: FilesConfig {
            extensions: Vec::new(),
            ..FilesConfig::default()
        },
        ..HookOrderConfig::default()
    };
    let err = validate_config(&config).unwrap_err();
    assert_eq!(err.to_string(), "files.extensions cannot be empty");
}

#[test]
fn test_validate_rejects_bad_exclude_glob() {
    let config = HookOrderConfig {
        files: FilesConfig {
            exclude: vec!["src/[".to_string()],
            ..FilesConfig::default()
        },
        ..HookOrderConfig::default()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_validate_rejects_future_schema() {
    let config = HookOrderConfig {
        schema_version: 99,
        ..HookOrderConfig::default()
    };
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("schema version 99"));
}
