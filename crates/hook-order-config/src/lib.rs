//! Layered configuration loading and validation (.hook-order.toml).

pub mod config;
pub mod validate;

pub use config::{
    CURRENT_SCHEMA_VERSION, FilesConfig, HookOrderConfig, PROJECT_CONFIG_FILE, RuleConfig,
    RuntimeOverrides, SettingsConfig, Severity,
};
pub use validate::validate_config;
