//! Transient user-facing notifications ("toasts").
//!
//! Components report outcomes through a [`NotificationSink`] handed to them,
//! never through ambient state. The engine owns the [`ToastQueue`]; tests can
//! collect into a plain `Vec<Toast>`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const TOAST_DURATION: Duration = Duration::from_secs(3);
/// Toasts shown at once. Older ones are dropped first.
pub const MAX_VISIBLE_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub body: String,
}

impl Toast {
    fn new(level: ToastLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, title, body)
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(ToastLevel::Warning, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, title, body)
    }
}

pub trait NotificationSink {
    fn notify(&mut self, toast: Toast);
}

impl NotificationSink for Vec<Toast> {
    fn notify(&mut self, toast: Toast) {
        self.push(toast);
    }
}

#[derive(Debug, Clone)]
struct Entry {
    toast: Toast,
    expires_at: Option<Instant>,
}

/// Visible toasts with expiry.
///
/// A toast's clock starts at the first [`ToastQueue::expire`] after it was
/// pushed, so pushing needs no time source.
#[derive(Debug, Default)]
pub struct ToastQueue {
    entries: VecDeque<Entry>,
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        // Same toast already on screen: restart its clock instead of stacking.
        if let Some(existing) = self.entries.iter_mut().find(|e| e.toast == toast) {
            existing.expires_at = None;
            return;
        }
        self.entries.push_back(Entry {
            toast,
            expires_at: None,
        });
        while self.entries.len() > MAX_VISIBLE_TOASTS {
            self.entries.pop_front();
        }
    }

    /// Stamp new toasts and drop those past their deadline.
    pub fn expire(&mut self, now: Instant) {
        for entry in &mut self.entries {
            entry.expires_at.get_or_insert(now + TOAST_DURATION);
        }
        self.entries
            .retain(|entry| entry.expires_at.is_some_and(|deadline| now < deadline));
    }

    /// Oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|entry| &entry.toast)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, toast: Toast) {
        self.push(toast);
    }
}
