//! Shared infrastructure utilities for calcvault.
//!
//! Cross-cutting helpers that several crates need but that don't belong in the
//! domain-pure `calcvault-types` crate:
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename) and
//!   owner-only directory creation

pub mod atomic_write;

pub use atomic_write::{Sensitivity, atomic_write, ensure_private_dir, recover_backup};
