use anyhow::{Context, Result};
use hook_order_core::{AliasTable, CheckOptions, OrderPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = ".hook-order.toml";

/// File extensions checked when the config does not list any.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

pub const DEFAULT_EXCLUDES: &[&str] = &["**/node_modules/**"];

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookOrderConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub rule: RuleConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

impl Default for HookOrderConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            settings: SettingsConfig::default(),
            rule: RuleConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

/// `[settings]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Canonical root name -> accepted aliases, e.g. `{ test = ["it"] }`.
    #[serde(default, alias = "globalAliases")]
    pub global_aliases: AliasTable,
}

/// `[rule]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub policy: OrderPolicy,
    #[serde(default)]
    pub severity: Severity,
}

/// How violations affect the exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Off,
    Warn,
    #[default]
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `[files]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_excludes(),
        }
    }
}

impl FilesConfig {
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    /// Compile `exclude` into glob patterns.
    pub fn exclude_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.exclude
            .iter()
            .map(|raw| {
                glob::Pattern::new(raw)
                    .with_context(|| format!("Invalid exclude pattern '{}'", raw))
            })
            .collect()
    }
}

/// Values supplied on the command line. They win over every file layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOverrides {
    /// `(canonical, alias)` pairs added to the alias table.
    pub aliases: Vec<(String, String)>,
    pub policy: Option<OrderPolicy>,
}

/// Deep merge two TOML values. Overlay wins for non-table values.
/// Tables are merged recursively (project-level keys override user-level keys).
fn merge_toml_values(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_map), toml::Value::Table(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged_val = match base_map.remove(&key) {
                    Some(base_val) => merge_toml_values(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged_val);
            }
            toml::Value::Table(base_map)
        }
        (_, overlay) => overlay,
    }
}

impl HookOrderConfig {
    /// Load config with fallback chain:
    ///
    /// 1. If both `<root>/.hook-order.toml` (project) and
    ///    `~/.config/hook-order/config.toml` (user) exist, deep-merge them with
    ///    project settings overriding user settings.
    /// 2. If only one exists, use it directly.
    /// 3. If neither exists, use the built-in defaults.
    pub fn load(project_root: &Path) -> Result<Self> {
        let project_path = Self::config_path(project_root);
        let user_path = Self::user_config_path();
        Self::load_with_paths(user_path.as_deref(), &project_path)
    }

    /// Load config from explicit paths. Testable without global filesystem state.
    pub fn load_with_paths(user_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let user_path = user_path.filter(|p| p.exists());
        let project_exists = project_path.exists();

        let config = match (user_path, project_exists) {
            (None, false) => {
                tracing::debug!("no config files found, using defaults");
                Self::default()
            }
            (Some(user), false) => Self::load_from_path(user)?,
            (None, true) => Self::load_from_path(project_path)?,
            (Some(user), true) => Self::load_merged(user, project_path)?,
        };
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Deep-merge user config (base) with project config (overlay).
    fn load_merged(base_path: &Path, overlay_path: &Path) -> Result<Self> {
        let base_str = std::fs::read_to_string(base_path)
            .with_context(|| format!("Failed to read user config: {}", base_path.display()))?;
        let overlay_str = std::fs::read_to_string(overlay_path).with_context(|| {
            format!("Failed to read project config: {}", overlay_path.display())
        })?;

        let base_val: toml::Value = toml::from_str(&base_str)
            .with_context(|| format!("Failed to parse user config: {}", base_path.display()))?;
        let overlay_val: toml::Value = toml::from_str(&overlay_str).with_context(|| {
            format!("Failed to parse project config: {}", overlay_path.display())
        })?;

        let merged = merge_toml_values(base_val, overlay_val);

        // Roundtrip through string for reliable deserialization
        let merged_str = toml::to_string(&merged).context("Failed to serialize merged config")?;
        let config: Self =
            toml::from_str(&merged_str).context("Failed to deserialize merged config")?;
        tracing::debug!(
            user = %base_path.display(),
            project = %overlay_path.display(),
            "merged user and project config"
        );
        Ok(config)
    }

    /// Path to user-level config: `~/.config/hook-order/config.toml`.
    ///
    /// Returns None if the config directory cannot be determined
    /// (e.g., no HOME in containers).
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "hook-order")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get the config file path for a project root
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_CONFIG_FILE)
    }

    /// Check if the config schema version is compatible with the current binary.
    pub fn check_schema_version(&self) -> Result<()> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            anyhow::bail!(
                "Config schema version {} is newer than this binary supports (v{}).",
                self.schema_version,
                CURRENT_SCHEMA_VERSION
            );
        }
        Ok(())
    }

    /// Layer command-line values over the loaded config.
    pub fn apply_overrides(&mut self, overrides: &RuntimeOverrides) {
        for (canonical, alias) in &overrides.aliases {
            self.settings.global_aliases.insert(canonical, alias.clone());
        }
        if let Some(policy) = overrides.policy {
            self.rule.policy = policy;
        }
    }

    /// Options handed to every per-file check.
    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            aliases: self.settings.global_aliases.clone(),
            policy: self.rule.policy,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
