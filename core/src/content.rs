//! Session-scoped content managers for files, images and notes.
//!
//! Records live only as long as the session. Ids are monotonic per collection
//! and never reused, even after a delete.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use calcvault_types::{FileEntry, ImageEntry, ImageFormat, Note, Record, RecordId};

pub const DEFAULT_NOTE_TITLE: &str = "New note";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("record {0} not found")]
    NotFound(RecordId),
    #[error("name must not be empty")]
    EmptyName,
    #[error("{name} is not a supported image (png, jpg, jpeg, gif, webp, bmp)")]
    UnsupportedImage { name: String },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where new records are inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertAt {
    Head,
    Tail,
}

#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Vec<R>,
    next_id: u64,
    insert_at: InsertAt,
}

pub type FileManager = Collection<FileEntry>;
pub type Gallery = Collection<ImageEntry>;
pub type NoteBook = Collection<Note>;

impl<R: Record> Collection<R> {
    #[must_use]
    pub fn new(insert_at: InsertAt) -> Self {
        Self {
            records: Vec::new(),
            next_id: 0,
            insert_at,
        }
    }

    /// Records matching `filter` (case-insensitive), in collection order.
    /// An empty or blank filter returns everything.
    #[must_use]
    pub fn list(&self, filter: &str) -> Vec<&R> {
        let needle = filter.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| needle.is_empty() || record.matches(&needle))
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Remove `id`. Removing an absent id is a no-op.
    pub fn delete(&mut self, id: RecordId) -> Option<R> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        debug!(%id, "Deleted record");
        Some(self.records.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn insert(&mut self, build: impl FnOnce(RecordId) -> R) -> &R {
        self.next_id += 1;
        let record = build(RecordId::new(self.next_id));
        match self.insert_at {
            InsertAt::Head => {
                self.records.insert(0, record);
                &self.records[0]
            }
            InsertAt::Tail => {
                self.records.push(record);
                &self.records[self.records.len() - 1]
            }
        }
    }
}

impl Collection<FileEntry> {
    #[must_use]
    pub fn files() -> Self {
        Self::new(InsertAt::Tail)
    }

    pub fn create(
        &mut self,
        name: &str,
        payload: Vec<u8>,
        now: DateTime<Utc>,
    ) -> Result<&FileEntry, ContentError> {
        let name = require_name(name)?;
        let kind = FileEntry::kind_for_name(&name);
        Ok(self.insert(|id| FileEntry {
            id,
            name,
            kind,
            payload,
            created_at: now,
            modified_at: now,
        }))
    }

    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(FileEntry::size).sum()
    }
}

impl Collection<ImageEntry> {
    #[must_use]
    pub fn gallery() -> Self {
        Self::new(InsertAt::Tail)
    }

    /// Only names with an image extension are accepted.
    pub fn create(
        &mut self,
        name: &str,
        payload: Vec<u8>,
        now: DateTime<Utc>,
    ) -> Result<&ImageEntry, ContentError> {
        let name = require_name(name)?;
        let format =
            ImageFormat::from_name(&name).ok_or_else(|| ContentError::UnsupportedImage {
                name: name.clone(),
            })?;
        Ok(self.insert(|id| ImageEntry {
            id,
            name,
            format,
            payload,
            created_at: now,
            modified_at: now,
        }))
    }

    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(ImageEntry::size).sum()
    }
}

impl Collection<Note> {
    #[must_use]
    pub fn notes() -> Self {
        Self::new(InsertAt::Head)
    }

    /// New empty note with the default title, placed first.
    pub fn create(&mut self, now: DateTime<Utc>) -> &Note {
        self.insert(|id| Note {
            id,
            title: DEFAULT_NOTE_TITLE.to_string(),
            content: String::new(),
            created_at: now,
            modified_at: now,
        })
    }

    /// Replace title and content, stamping a modification time no earlier
    /// than the creation time.
    pub fn update(
        &mut self,
        id: RecordId,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<&Note, ContentError> {
        let note = self
            .records
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(ContentError::NotFound(id))?;
        note.title = title.to_string();
        note.content = content.to_string();
        note.modified_at = now.max(note.created_at);
        debug!(%id, "Updated note");
        Ok(&*note)
    }

    /// Total bytes of note text.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.records
            .iter()
            .map(|note| (note.title.len() + note.content.len()) as u64)
            .sum()
    }
}

/// Read a file from disk for import, returning its display name and bytes.
pub fn read_import(path: &Path) -> Result<(String, Vec<u8>), ContentError> {
    let payload = fs::read(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(ContentError::EmptyName)?;
    Ok((name, payload))
}

fn require_name(name: &str) -> Result<String, ContentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ContentError::EmptyName);
    }
    Ok(name.to_string())
}
