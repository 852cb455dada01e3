//! Core domain types for calcvault.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod records;
mod settings;
pub mod ui;

pub use records::{FileEntry, ImageEntry, ImageFormat, Note, Record, RecordId, format_size};
pub use settings::{LockPreferences, LockTime};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Screens & Intents
// ============================================================================

/// One mutually-exclusive presentation state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    InitialSetup,
    #[default]
    Calculator,
    VaultLogin,
    VaultDashboard,
    Files,
    Gallery,
    Notes,
    Trash,
    Settings,
}

impl Screen {
    /// Pages reachable from the dashboard via `Intent::Navigate`.
    pub const VAULT_SUBPAGES: [Screen; 5] = [
        Screen::Files,
        Screen::Gallery,
        Screen::Notes,
        Screen::Trash,
        Screen::Settings,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::InitialSetup => "initial-setup",
            Screen::Calculator => "calculator",
            Screen::VaultLogin => "vault-login",
            Screen::VaultDashboard => "vault-dashboard",
            Screen::Files => "files",
            Screen::Gallery => "gallery",
            Screen::Notes => "notes",
            Screen::Trash => "trash",
            Screen::Settings => "settings",
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Screen::InitialSetup => "Vault Setup",
            Screen::Calculator => "Calculator",
            Screen::VaultLogin => "Secure Vault",
            Screen::VaultDashboard => "Dashboard",
            Screen::Files => "File Manager",
            Screen::Gallery => "Image Gallery",
            Screen::Notes => "Notes",
            Screen::Trash => "Trash",
            Screen::Settings => "Settings",
        }
    }

    /// Parse a screen from its identifier (e.g. `"notes"`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "initial-setup" => Some(Screen::InitialSetup),
            "calculator" => Some(Screen::Calculator),
            "vault-login" => Some(Screen::VaultLogin),
            "vault-dashboard" | "dashboard" => Some(Screen::VaultDashboard),
            "files" => Some(Screen::Files),
            "gallery" => Some(Screen::Gallery),
            "notes" => Some(Screen::Notes),
            "trash" => Some(Screen::Trash),
            "settings" => Some(Screen::Settings),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_vault_subpage(&self) -> bool {
        Self::VAULT_SUBPAGES.contains(self)
    }

    /// Screens that are only reachable after a successful login.
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        *self == Screen::VaultDashboard || self.is_vault_subpage()
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed navigation request emitted by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SetupComplete,
    SecretDetected,
    LoginSuccess,
    Logout,
    /// Only valid from the dashboard, and only toward a vault subpage.
    Navigate(Screen),
    Back,
    /// All persisted state was wiped; the session restarts at first-run setup.
    DataWiped,
}

// ============================================================================
// Calculator
// ============================================================================

/// Binary operators understood by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Returns the right-hand operand unchanged.
    Equals,
}

impl Operator {
    #[must_use]
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
            Operator::Equals => '=',
        }
    }

    /// Map a typed key to an operator. Accepts both ASCII and display symbols.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' | 'x' | '×' => Some(Operator::Multiply),
            '/' | '÷' => Some(Operator::Divide),
            '=' => Some(Operator::Equals),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============================================================================
// Credentials
// ============================================================================

pub const PASSWORD_MIN_LEN: usize = 4;
pub const PASSWORD_MAX_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("password must be at least {PASSWORD_MIN_LEN} digits (got {len})")]
    TooShort { len: usize },
    #[error("password must be at most {PASSWORD_MAX_LEN} digits (got {len})")]
    TooLong { len: usize },
    #[error("password must contain digits only")]
    NonDigit,
}

/// A vault password: 4 to 8 ASCII digits.
///
/// Existence of a value is the proof of its validity.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let len = raw.chars().count();
        if len < PASSWORD_MIN_LEN {
            return Err(ValidationError::TooShort { len });
        }
        if len > PASSWORD_MAX_LEN {
            return Err(ValidationError::TooLong { len });
        }
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::NonDigit);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact string comparison against an entered code.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        self.0 == code
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Manual Debug impl to prevent leaking the password in logs.
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

impl TryFrom<&str> for Password {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordChangeError {
    #[error("current password is incorrect")]
    WrongCurrent,
    #[error("new password must be at least {PASSWORD_MIN_LEN} digits")]
    TooShort,
    #[error("new password does not match the confirmation")]
    Mismatch,
    #[error("new password is invalid: {0}")]
    Invalid(ValidationError),
}

/// Outcome of submitting an access code at the vault login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessResult {
    Granted,
    RejectedWithRemaining(u8),
    Locked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_accepts_four_to_eight_digits() {
        for raw in ["1234", "12345", "000000", "1234567", "87654321"] {
            let password = Password::new(raw).expect("valid password");
            assert_eq!(password.as_str(), raw);
        }
    }

    #[test]
    fn password_rejects_bad_lengths() {
        assert_eq!(
            Password::new("123"),
            Err(ValidationError::TooShort { len: 3 })
        );
        assert_eq!(Password::new(""), Err(ValidationError::TooShort { len: 0 }));
        assert_eq!(
            Password::new("123456789"),
            Err(ValidationError::TooLong { len: 9 })
        );
    }

    #[test]
    fn password_rejects_non_digits() {
        assert_eq!(Password::new("12a4"), Err(ValidationError::NonDigit));
        assert_eq!(Password::new("12 34"), Err(ValidationError::NonDigit));
        assert_eq!(Password::new("١٢٣٤"), Err(ValidationError::NonDigit));
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("4321").unwrap();
        let debug = format!("{password:?}");
        assert!(!debug.contains("4321"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn screen_parse_round_trips_identifiers() {
        for screen in [
            Screen::InitialSetup,
            Screen::Calculator,
            Screen::VaultLogin,
            Screen::VaultDashboard,
            Screen::Files,
            Screen::Gallery,
            Screen::Notes,
            Screen::Trash,
            Screen::Settings,
        ] {
            assert_eq!(Screen::parse(screen.as_str()), Some(screen));
        }
        assert_eq!(Screen::parse("NOTES"), Some(Screen::Notes));
        assert_eq!(Screen::parse("vault"), None);
    }

    #[test]
    fn subpages_are_unlocked_but_login_is_not() {
        assert!(Screen::Notes.is_vault_subpage());
        assert!(Screen::Settings.is_unlocked());
        assert!(Screen::VaultDashboard.is_unlocked());
        assert!(!Screen::VaultDashboard.is_vault_subpage());
        assert!(!Screen::VaultLogin.is_unlocked());
        assert!(!Screen::Calculator.is_unlocked());
    }

    #[test]
    fn operator_from_char_accepts_ascii_and_display_symbols() {
        assert_eq!(Operator::from_char('*'), Some(Operator::Multiply));
        assert_eq!(Operator::from_char('×'), Some(Operator::Multiply));
        assert_eq!(Operator::from_char('/'), Some(Operator::Divide));
        assert_eq!(Operator::from_char('÷'), Some(Operator::Divide));
        assert_eq!(Operator::from_char('7'), None);
        assert_eq!(Operator::Divide.to_string(), "÷");
    }
}
