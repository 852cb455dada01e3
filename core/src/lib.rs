//! Core domain logic for calcvault.
//!
//! Every component here is synchronous and clock-free: callers pass `now`
//! explicitly, and side effects that need a delay come back as signals for
//! the engine to schedule.

pub mod access;
pub mod backup;
pub mod calculator;
pub mod content;
pub mod credentials;
mod gate;
pub mod navigation;
pub mod notifications;
pub mod scheduler;
pub mod store;

pub use access::{AccessController, LOCKOUT_DURATION, MAX_ATTEMPTS};
pub use backup::{
    BackupDocument, ExportError, ImportError, backup_file_name, export_json, import_file,
    import_json, write_backup,
};
pub use calculator::{CalcSignal, Calculator, SECRET_ACCESS_DELAY, SECRET_SENTINEL};
pub use content::{
    Collection, ContentError, FileManager, Gallery, InsertAt, NoteBook, read_import,
};
pub use credentials::{Credential, CredentialError, CredentialStore};
pub use gate::determine_initial_screen;
pub use navigation::{Navigator, Transition, transition};
pub use notifications::{NotificationSink, Toast, ToastLevel, ToastQueue};
pub use scheduler::{ScheduledTask, Scheduler, TaskId, TimerKind};
pub use store::{JsonFileStore, KvStore, MemoryStore, StoreError};
