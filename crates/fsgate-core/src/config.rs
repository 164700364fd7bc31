//! Permission configuration.
//!
//! Every option is optional. Missing keys, and a missing configuration as a
//! whole, fall back to the fixed defaults in this module; that is never an
//! error. Only values that are present but out of range are rejected.
//!
//! # File format
//!
//! ```toml
//! [permissions]
//! umask = 0o022
//! supergroup = "supergroup"
//! fs_owner = "fsgate"
//! default_file_mode = 0o666
//! default_dir_mode = 0o777
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Umask applied to new ACLs when none is configured.
pub const DEFAULT_UMASK: u16 = 0o022;

/// Group exempted from all checks when none is configured.
pub const DEFAULT_SUPERGROUP: &str = "supergroup";

/// Owner of the file system when none is configured.
pub const DEFAULT_FS_OWNER: &str = "fsgate";

/// Mode of new files, before the umask.
pub const DEFAULT_FILE_MODE: u16 = 0o666;

/// Mode of new directories, before the umask.
pub const DEFAULT_DIR_MODE: u16 = 0o777;

/// Environment variable that points at a configuration file.
pub const CONFIG_ENV_VAR: &str = "FSGATE_CONFIG";

const MAX_MODE: u16 = 0o1777;
const MAX_UMASK: u16 = 0o777;

/// Options consumed by ACL construction and the permission checker.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionConfig {
    /// Bits removed from the default mode of every new node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umask: Option<u16>,

    /// Group whose members bypass all permission checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supergroup: Option<String>,

    /// User that owns the file system and bypasses all permission checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_owner: Option<String>,

    /// Mode given to new files before the umask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_file_mode: Option<u16>,

    /// Mode given to new directories before the umask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_dir_mode: Option<u16>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    permissions: PermissionConfig,
}

impl PermissionConfig {
    /// Configured umask, or [`DEFAULT_UMASK`].
    pub fn umask(&self) -> u16 {
        self.umask.unwrap_or(DEFAULT_UMASK)
    }

    /// Configured supergroup, or [`DEFAULT_SUPERGROUP`].
    pub fn supergroup(&self) -> &str {
        self.supergroup.as_deref().unwrap_or(DEFAULT_SUPERGROUP)
    }

    /// Configured file system owner, or [`DEFAULT_FS_OWNER`].
    pub fn fs_owner(&self) -> &str {
        self.fs_owner.as_deref().unwrap_or(DEFAULT_FS_OWNER)
    }

    /// Configured default file mode, or [`DEFAULT_FILE_MODE`].
    pub fn default_file_mode(&self) -> u16 {
        self.default_file_mode.unwrap_or(DEFAULT_FILE_MODE)
    }

    /// Configured default directory mode, or [`DEFAULT_DIR_MODE`].
    pub fn default_dir_mode(&self) -> u16 {
        self.default_dir_mode.unwrap_or(DEFAULT_DIR_MODE)
    }

    /// Default mode for a new node of the given kind.
    pub fn default_mode(&self, is_directory: bool) -> u16 {
        if is_directory {
            self.default_dir_mode()
        } else {
            self.default_file_mode()
        }
    }

    /// Rejects values that are present but cannot be a permission.
    pub fn validate(&self) -> Result<()> {
        if let Some(umask) = self.umask
            && umask > MAX_UMASK
        {
            return Err(Error::config(format!(
                "umask {umask:#o} is out of range (max {MAX_UMASK:#o})"
            )));
        }
        for (key, value) in [
            ("default_file_mode", self.default_file_mode),
            ("default_dir_mode", self.default_dir_mode),
        ] {
            if let Some(mode) = value
                && mode > MAX_MODE
            {
                return Err(Error::config(format!(
                    "{key} {mode:#o} is out of range (max {MAX_MODE:#o})"
                )));
            }
        }
        if matches!(self.supergroup.as_deref(), Some("")) {
            return Err(Error::config("supergroup must not be empty"));
        }
        if matches!(self.fs_owner.as_deref(), Some("")) {
            return Err(Error::config("fs_owner must not be empty"));
        }
        Ok(())
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        file.permissions.validate()?;
        Ok(file.permissions)
    }

    /// Renders the configuration as TOML, in the format
    /// [`from_toml_str`](Self::from_toml_str) reads.
    pub fn to_toml_string(&self) -> Result<String> {
        let file = ConfigFile {
            permissions: self.clone(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    /// Reads a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::TomlParse(err) => {
                Error::config(format!("Failed to parse {}: {err}", path.display()))
            }
            other => other,
        })
    }

    /// Loads configuration, falling back to defaults when no file exists.
    ///
    /// An explicitly given path must exist. The resolved default location is
    /// optional.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::resolve_config_path(None) {
            Some(path) if path.exists() => {
                log::debug!("Loading permission config from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                log::debug!("No permission config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Resolve the configuration file path.
    ///
    /// Checks in order:
    /// 1. The explicit path, if given
    /// 2. The `FSGATE_CONFIG` environment variable
    /// 3. `<config dir>/fsgate/config.toml`
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        resolve_config_path_with(explicit, std::env::var(CONFIG_ENV_VAR).ok())
    }

    /// The platform default configuration path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fsgate").join("config.toml"))
    }
}

fn resolve_config_path_with(explicit: Option<&str>, env_value: Option<String>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }
    if let Some(path) = env_value.filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    PermissionConfig::default_config_path()
}
