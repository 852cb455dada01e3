//! Vault lock preferences.
//!
//! These are persisted next to the credential but no component enforces them;
//! they are user-facing preferences only.

/// Auto-lock delay choices offered by the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockTime {
    OneMinute,
    #[default]
    FiveMinutes,
    TenMinutes,
    ThirtyMinutes,
}

impl LockTime {
    pub const ALL: [LockTime; 4] = [
        LockTime::OneMinute,
        LockTime::FiveMinutes,
        LockTime::TenMinutes,
        LockTime::ThirtyMinutes,
    ];

    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            LockTime::OneMinute => 1,
            LockTime::FiveMinutes => 5,
            LockTime::TenMinutes => 10,
            LockTime::ThirtyMinutes => 30,
        }
    }

    #[must_use]
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.minutes() == minutes)
    }

    /// Next choice, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPreferences {
    pub auto_lock: bool,
    pub lock_time: LockTime,
}

impl Default for LockPreferences {
    fn default() -> Self {
        Self {
            auto_lock: true,
            lock_time: LockTime::default(),
        }
    }
}
