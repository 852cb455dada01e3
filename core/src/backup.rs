//! Backup export and import of the vault credential.
//!
//! The document is a flat JSON object:
//!
//! ```json
//! {
//!   "vault_password": "1234",
//!   "vault_setup_complete": "true",
//!   "exportDate": "2026-10-16T09:30:00.000Z"
//! }
//! ```
//!
//! Import needs `vault_password` and ignores everything else. It either
//! applies completely or not at all.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use calcvault_types::{Password, ValidationError};
use calcvault_utils::{Sensitivity, atomic_write, ensure_private_dir};

use crate::credentials::{CredentialError, CredentialStore, PASSWORD_KEY, SETUP_COMPLETE_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub vault_password: Option<String>,
    pub vault_setup_complete: Option<String>,
    #[serde(rename = "exportDate")]
    pub export_date: String,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode backup: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write backup to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("backup file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("backup file has no vault_password")]
    MissingPassword,
    #[error("backup password is invalid: {0}")]
    InvalidPassword(#[from] ValidationError),
    #[error("failed to read backup {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl BackupDocument {
    #[must_use]
    pub fn capture(credentials: &CredentialStore, now: DateTime<Utc>) -> Self {
        Self {
            vault_password: credentials.raw(PASSWORD_KEY),
            vault_setup_complete: credentials.raw(SETUP_COMPLETE_KEY),
            export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Pretty-printed backup document.
pub fn export_json(credentials: &CredentialStore, now: DateTime<Utc>) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&BackupDocument::capture(
        credentials,
        now,
    ))?)
}

/// `vault_backup_YYYY-MM-DD.json`
#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("vault_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Write a backup into `dir`, returning the file written.
pub fn write_backup(
    credentials: &CredentialStore,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    let json = export_json(credentials, now)?;
    let path = dir.join(backup_file_name(now.date_naive()));
    let write_err = |source| ExportError::Write {
        path: path.clone(),
        source,
    };
    ensure_private_dir(dir).map_err(write_err)?;
    atomic_write(&path, json.as_bytes(), Sensitivity::OwnerOnly).map_err(write_err)?;
    info!(path = %path.display(), "Exported vault backup");
    Ok(path)
}

/// Apply a backup document.
///
/// The setup flag falls back to `"true"` when the document leaves it out.
pub fn import_json(credentials: &mut CredentialStore, text: &str) -> Result<(), ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let object = value.as_object().ok_or(ImportError::MissingPassword)?;
    let raw = object
        .get(PASSWORD_KEY)
        .and_then(Value::as_str)
        .filter(|raw| !raw.is_empty())
        .ok_or(ImportError::MissingPassword)?;
    let password = Password::new(raw)?;

    let setup_flag = match object.get(SETUP_COMPLETE_KEY) {
        Some(Value::String(flag)) if !flag.is_empty() => flag.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => "true".to_string(),
    };

    credentials.restore(&password, &setup_flag)?;
    info!("Imported vault backup");
    Ok(())
}

pub fn import_file(credentials: &mut CredentialStore, path: &Path) -> Result<(), ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_json(credentials, &text)
}
