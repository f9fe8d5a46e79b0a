//! Handlers for the `config` subcommands.

use crate::cli::ConfigAction;
use crate::config::{NodescopeConfig, PROJECT_NAME};
use nodescope::{Error, Result};
use std::io::Write;
use std::path::PathBuf;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handles a `config` subcommand, printing to `out`.
pub fn handle_config_command<W: Write>(
    config_path: Option<&str>,
    action: ConfigAction,
    out: W,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path, out),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key, out),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force, out),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Shows the resolved config file path.
pub fn cmd_config_path<W: Write>(config_path: Option<&str>, mut out: W) -> Result<()> {
    let path = NodescopeConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;

    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        tracing::warn!(
            "{} does not exist; run `{PROJECT_NAME} config init` to create it",
            path.display()
        );
    }
    Ok(())
}

/// Prints a configuration value by dotted key.
pub fn cmd_config_get<W: Write>(config_path: Option<&str>, key: &str, mut out: W) -> Result<()> {
    let config = NodescopeConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let found = get_nested_value(&value, key).ok_or_else(|| Error::not_found("config key", key))?;
    writeln!(out, "{}", format_toml_value(found))?;
    Ok(())
}

/// Writes a default configuration file.
pub fn cmd_config_init<W: Write>(file: Option<&str>, force: bool, mut out: W) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => NodescopeConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = NodescopeConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

// ============================================================================
// TOML helpers
// ============================================================================

/// Navigates a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Formats a TOML value for display.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
