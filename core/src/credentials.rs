//! Credential store: the vault password, the setup flag, and lock preferences.
//!
//! Passwords are stored and compared in plain text. Anything that needs real
//! secrecy must hash and salt before it reaches this layer.

use thiserror::Error;
use tracing::{info, warn};

use calcvault_types::{
    LockPreferences, LockTime, PASSWORD_MIN_LEN, Password, PasswordChangeError, ValidationError,
};

use crate::store::{KvStore, MemoryStore, StoreError};

pub const PASSWORD_KEY: &str = "vault_password";
pub const SETUP_COMPLETE_KEY: &str = "vault_setup_complete";
pub const AUTO_LOCK_KEY: &str = "vault_auto_lock";
pub const LOCK_TIME_KEY: &str = "vault_lock_time";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub password: Password,
    pub setup_complete: bool,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Change(#[from] PasswordChangeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct CredentialStore {
    store: Box<dyn KvStore>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("setup_complete", &self.is_setup_complete())
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    #[must_use]
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// `true` only for the exact persisted value `"true"`.
    #[must_use]
    pub fn is_setup_complete(&self) -> bool {
        self.store.get(SETUP_COMPLETE_KEY).as_deref() == Some("true")
    }

    /// Validate and persist a first-run password, marking setup complete.
    ///
    /// Nothing is written when validation fails.
    pub fn save(&mut self, password: &str) -> Result<(), CredentialError> {
        let password = Password::new(password)?;
        let previous = self.store.get(PASSWORD_KEY);
        self.store.set(PASSWORD_KEY, password.as_str())?;
        if let Err(err) = self.store.set(SETUP_COMPLETE_KEY, "true") {
            self.rollback_password(previous);
            return Err(err.into());
        }
        info!("Vault password saved");
        Ok(())
    }

    #[must_use]
    pub fn load(&self) -> Option<Credential> {
        let password = self.password()?;
        Some(Credential {
            password,
            setup_complete: self.is_setup_complete(),
        })
    }

    /// The stored password, if present and well-formed.
    #[must_use]
    pub fn password(&self) -> Option<Password> {
        let raw = self.store.get(PASSWORD_KEY)?;
        match Password::new(raw) {
            Ok(password) => Some(password),
            Err(err) => {
                warn!("Ignoring malformed stored password: {err}");
                None
            }
        }
    }

    pub fn change_password(
        &mut self,
        current: &str,
        next: &str,
        confirm: &str,
    ) -> Result<(), CredentialError> {
        let stored = self.password();
        if !stored.is_some_and(|p| p.matches(current)) {
            return Err(PasswordChangeError::WrongCurrent.into());
        }
        if next.chars().count() < PASSWORD_MIN_LEN {
            return Err(PasswordChangeError::TooShort.into());
        }
        if next != confirm {
            return Err(PasswordChangeError::Mismatch.into());
        }
        let next = Password::new(next).map_err(PasswordChangeError::Invalid)?;
        self.store.set(PASSWORD_KEY, next.as_str())?;
        info!("Vault password changed");
        Ok(())
    }

    /// Replace the credential wholesale (backup import).
    pub fn restore(&mut self, password: &Password, setup_flag: &str) -> Result<(), CredentialError> {
        let previous = self.store.get(PASSWORD_KEY);
        self.store.set(PASSWORD_KEY, password.as_str())?;
        if let Err(err) = self.store.set(SETUP_COMPLETE_KEY, setup_flag) {
            self.rollback_password(previous);
            return Err(err.into());
        }
        Ok(())
    }

    /// Clear every persisted entry. Callers must have confirmed with the user.
    pub fn wipe(&mut self) -> Result<(), CredentialError> {
        self.store.clear()?;
        warn!("All vault data wiped");
        Ok(())
    }

    #[must_use]
    pub fn lock_preferences(&self) -> LockPreferences {
        let defaults = LockPreferences::default();
        let auto_lock = match self.store.get(AUTO_LOCK_KEY).as_deref() {
            Some("true") => true,
            Some("false") => false,
            _ => defaults.auto_lock,
        };
        let lock_time = self
            .store
            .get(LOCK_TIME_KEY)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .and_then(LockTime::from_minutes)
            .unwrap_or(defaults.lock_time);
        LockPreferences {
            auto_lock,
            lock_time,
        }
    }

    pub fn set_lock_preferences(&mut self, prefs: LockPreferences) -> Result<(), CredentialError> {
        self.store
            .set(AUTO_LOCK_KEY, if prefs.auto_lock { "true" } else { "false" })?;
        self.store
            .set(LOCK_TIME_KEY, &prefs.lock_time.minutes().to_string())?;
        Ok(())
    }

    /// Raw persisted value, for export.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    fn rollback_password(&mut self, previous: Option<String>) {
        let result = match previous {
            Some(previous) => self.store.set(PASSWORD_KEY, &previous),
            None => self.store.remove(PASSWORD_KEY),
        };
        if let Err(err) = result {
            warn!("Failed to roll back password after partial write: {err}");
        }
    }
}
