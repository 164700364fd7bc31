//! Handler functions for `fsgate config` commands.
//!
//! Handlers return the text to print instead of printing it.

use std::path::{Path, PathBuf};

use fsgate_core::config::{
    DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, DEFAULT_FS_OWNER, DEFAULT_SUPERGROUP, DEFAULT_UMASK,
};
use fsgate_core::{Error, PermissionConfig, Result};

use crate::cli::ConfigAction;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<String> {
    match PermissionConfig::resolve_config_path(config_path) {
        Some(path) if path.exists() => Ok(path.display().to_string()),
        Some(path) => Ok(format!(
            "{}\n(file does not exist; run `fsgate config init` to create it)",
            path.display()
        )),
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Show the effective configuration, defaults filled in.
pub fn cmd_config_show(config_path: Option<&str>) -> Result<String> {
    effective(&PermissionConfig::load(config_path)?).to_toml_string()
}

/// Get one effective configuration value.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = effective(&PermissionConfig::load(config_path)?);
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match value.get(key) {
        Some(toml::Value::String(s)) => Ok(s.clone()),
        Some(toml::Value::Integer(n)) if key.contains("mode") || key == "umask" => {
            Ok(format!("{n:04o}"))
        }
        Some(other) => Ok(other.to_string()),
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Write a config file holding the defaults.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<String> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => PermissionConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };
    write_defaults(&path, force)?;
    Ok(format!("Config file created at {}", path.display()))
}

fn write_defaults(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = effective(&PermissionConfig::default()).to_toml_string()?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))
}

fn effective(config: &PermissionConfig) -> PermissionConfig {
    PermissionConfig {
        umask: Some(config.umask()),
        supergroup: Some(config.supergroup().to_string()),
        fs_owner: Some(config.fs_owner().to_string()),
        default_file_mode: Some(config.default_file_mode()),
        default_dir_mode: Some(config.default_dir_mode()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_fills_defaults() {
        let config = effective(&PermissionConfig::default());
        assert_eq!(config.umask, Some(DEFAULT_UMASK));
        assert_eq!(config.supergroup.as_deref(), Some(DEFAULT_SUPERGROUP));
        assert_eq!(config.fs_owner.as_deref(), Some(DEFAULT_FS_OWNER));
        assert_eq!(config.default_file_mode, Some(DEFAULT_FILE_MODE));
        assert_eq!(config.default_dir_mode, Some(DEFAULT_DIR_MODE));
    }

    #[test]
    fn test_config_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fsgate").join("config.toml");
        let path_str = path.to_str().unwrap();

        let out = cmd_config_init(Some(path_str), false).unwrap();
        assert!(out.contains("config.toml"));
        let err = cmd_config_init(Some(path_str), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        cmd_config_init(Some(path_str), true).unwrap();
    }

    #[test]
    fn test_config_show_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[permissions]\numask = 0o077\n").unwrap();

        let shown = cmd_config_show(path.to_str()).unwrap();
        let parsed = PermissionConfig::from_toml_str(&shown).unwrap();
        assert_eq!(parsed.umask, Some(0o077));
        assert_eq!(parsed.supergroup.as_deref(), Some("supergroup"));
    }

    #[test]
    fn test_config_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[permissions]\nsupergroup = \"admins\"\n").unwrap();
        let path = path.to_str();

        assert_eq!(cmd_config_get(path, "supergroup").unwrap(), "admins");
        assert_eq!(cmd_config_get(path, "umask").unwrap(), "0022");
        assert_eq!(cmd_config_get(path, "default_dir_mode").unwrap(), "0777");
        assert!(cmd_config_get(path, "nope").is_err());
    }

    #[test]
    fn test_config_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let out = cmd_config_path(path.to_str()).unwrap();
        assert!(out.contains("does not exist"));
    }
}
