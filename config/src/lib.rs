//! Configuration for calcvault.
//!
//! ```toml
//! [app]
//! ascii_only = false
//! high_contrast = false
//!
//! [storage]
//! path = "~/.calcvault/vault.json"
//! backup_dir = "${HOME}/vault-backups"
//! ```
//!
//! Every field is optional. A missing file means defaults.

use std::{env, fs, io, path::Path, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use calcvault_types::ui::UiOptions;
use calcvault_utils::{Sensitivity, atomic_write, ensure_private_dir};

const APP_DIR: &str = ".calcvault";
const STORE_FILE: &str = "vault.json";
const BACKUP_DIR: &str = "backups";

/// Overrides the key-value store path.
pub const STORE_ENV: &str = "CALCVAULT_STORE";
/// Forces the high-contrast palette when set to `1` or `true`.
pub const HIGH_CONTRAST_ENV: &str = "CALCVAULT_HIGH_CONTRAST";

#[derive(Debug, Default, Deserialize)]
pub struct VaultConfig {
    pub app: Option<AppConfig>,
    pub storage: Option<StorageConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and keypad symbols.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Key-value store file. Supports `~/` and `${VAR}` expansion.
    pub path: Option<String>,
    /// Directory that receives exported backups.
    pub backup_dir: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl VaultConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolved UI options, with the environment taking precedence.
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let app = self.app.as_ref();
        let env_high_contrast = env::var(HIGH_CONTRAST_ENV)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);
        UiOptions {
            ascii_only: app.is_some_and(|a| a.ascii_only),
            high_contrast: env_high_contrast || app.is_some_and(|a| a.high_contrast),
        }
    }

    /// Store file: `$CALCVAULT_STORE`, then `[storage] path`, then `~/.calcvault/vault.json`.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        if let Ok(raw) = env::var(STORE_ENV)
            && !raw.trim().is_empty()
        {
            return expand_path(&raw);
        }
        self.storage
            .as_ref()
            .and_then(|s| s.path.as_deref())
            .map(expand_path)
            .unwrap_or_else(|| data_dir().join(STORE_FILE))
    }

    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.storage
            .as_ref()
            .and_then(|s| s.backup_dir.as_deref())
            .map(expand_path)
            .unwrap_or_else(|| data_dir().join(BACKUP_DIR))
    }

    /// Persist the high-contrast preference to the config file.
    pub fn persist_high_contrast(enabled: bool) -> io::Result<()> {
        let path = config_path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config path")
        })?;
        persist_high_contrast_at(&path, enabled)
    }
}

/// Uses `toml_edit` to preserve comments and formatting.
/// Creates the config file and parent directory if they don't exist.
pub fn persist_high_contrast_at(path: &Path, enabled: bool) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_private_dir(parent)?;
    }

    let content = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if !doc.contains_key("app") {
        doc["app"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["app"]["high_contrast"] = toml_edit::value(enabled);

    atomic_write(path, doc.to_string().as_bytes(), Sensitivity::Public)?;
    tracing::info!(path = %path.display(), enabled, "Persisted high contrast preference");
    Ok(())
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR).join("config.toml"))
}

/// Application data directory (`~/.calcvault`), falling back to `./.calcvault`.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(APP_DIR), |home| home.join(APP_DIR))
}

/// Expand `${VAR}` references and a leading `~/` in a user-supplied path.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    let expanded = expand_env_vars(raw.trim());
    if let Some(rest) = expanded.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(expanded)
}

/// Replace `${VAR}` references with their environment values (missing vars become empty).
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_path_resolves_home_prefix() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_path("~/vault/a.json"), home.join("vault/a.json"));
        assert_eq!(expand_path(" /tmp/b.json "), PathBuf::from("/tmp/b.json"));
        assert_eq!(expand_path("notes/~/c"), PathBuf::from("notes/~/c"));
    }

    #[test]
    fn expand_env_vars_no_vars() {
        assert_eq!(expand_env_vars("hello world"), "hello world");
    }

    #[test]
    fn expand_env_vars_single_var() {
        unsafe {
            env::set_var("CALCVAULT_TEST_CONFIG_VAR", "replaced");
        }
        assert_eq!(
            expand_env_vars("prefix ${CALCVAULT_TEST_CONFIG_VAR} suffix"),
            "prefix replaced suffix"
        );
        unsafe {
            env::remove_var("CALCVAULT_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        unsafe {
            env::remove_var("CALCVAULT_MISSING_VAR_FOR_TEST");
        }
        assert_eq!(
            expand_env_vars("before ${CALCVAULT_MISSING_VAR_FOR_TEST} after"),
            "before  after"
        );
    }

    #[test]
    fn expand_env_vars_unterminated_is_literal() {
        assert_eq!(expand_env_vars("a ${OOPS"), "a ${OOPS");
    }

    #[test]
    fn load_from_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = VaultConfig::load_from(&dir.path().join("absent.toml")).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_from_parses_sections() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[app]\nascii_only = true\n\n[storage]\npath = \"/tmp/store.json\"\nbackup_dir = \"/tmp/backups\"\n",
        )
        .expect("write");

        let config = VaultConfig::load_from(&path).expect("load").expect("present");
        assert!(config.app.as_ref().is_some_and(|a| a.ascii_only));
        assert_eq!(config.backup_dir(), PathBuf::from("/tmp/backups"));
    }

    #[test]
    fn load_from_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[app\nascii_only = ").expect("write");

        let err = VaultConfig::load_from(&path).expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn persist_high_contrast_preserves_comments() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "# my settings\n[app]\nascii_only = true\n").expect("write");

        persist_high_contrast_at(&path, true).expect("persist");

        let written = fs::read_to_string(&path).expect("read");
        assert!(written.contains("# my settings"));
        assert!(written.contains("high_contrast = true"));
        let config = VaultConfig::load_from(&path).expect("load").expect("present");
        let app = config.app.expect("app section");
        assert!(app.ascii_only);
        assert!(app.high_contrast);
    }

    #[test]
    fn persist_high_contrast_creates_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        persist_high_contrast_at(&path, false).expect("persist");

        let config = VaultConfig::load_from(&path).expect("load").expect("present");
        assert!(!config.app.expect("app section").high_contrast);
    }
}
