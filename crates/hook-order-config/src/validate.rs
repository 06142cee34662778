use anyhow::{Result, bail};

use crate::config::HookOrderConfig;

/// Validate a loaded configuration.
/// Returns Ok(()) if valid, or Err with descriptive messages.
pub fn validate_config(config: &HookOrderConfig) -> Result<()> {
    config.check_schema_version()?;
    validate_aliases(config)?;
    validate_files(config)?;
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn validate_aliases(config: &HookOrderConfig) -> Result<()> {
    for (canonical, aliases) in config.settings.global_aliases.iter() {
        if !is_identifier(canonical) {
            bail!(
                "settings.global_aliases: '{}' is not a valid identifier",
                canonical
            );
        }
        for alias in aliases {
            if !is_identifier(alias) {
                bail!(
                    "settings.global_aliases.{}: '{}' is not a valid identifier",
                    canonical,
                    alias
                );
            }
            if alias == canonical {
                bail!(
                    "settings.global_aliases.{}: alias '{}' repeats its canonical name",
                    canonical,
                    alias
                );
            }
        }
    }
    Ok(())
}

fn validate_files(config: &HookOrderConfig) -> Result<()> {
    if config.files.extensions.is_empty() {
        bail!("files.extensions cannot be empty");
    }
    for ext in &config.files.extensions {
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            bail!(
                "files.extensions: '{}' must be a bare extension such as \"ts\"",
                ext
            );
        }
    }
    config.files.exclude_patterns()?;
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
