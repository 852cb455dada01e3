//! Session-scoped content records held by the vault's content managers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a record, unique within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(u64);

impl RecordId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Common surface of every record kind.
pub trait Record {
    fn id(&self) -> RecordId;

    /// Case-insensitive substring match. `needle` is already lowercased.
    fn matches(&self, needle: &str) -> bool;

    fn created_at(&self) -> DateTime<Utc>;

    fn modified_at(&self) -> DateTime<Utc>;
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// A file stored in the vault's file manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub id: RecordId,
    pub name: String,
    /// Upper-cased extension ("PDF"), or "FILE" when there is none.
    pub kind: String,
    pub payload: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl FileEntry {
    #[must_use]
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    #[must_use]
    pub fn kind_for_name(name: &str) -> String {
        name.rsplit_once('.')
            .map(|(_, ext)| ext.trim())
            .filter(|ext| !ext.is_empty())
            .map_or_else(|| "FILE".to_string(), str::to_ascii_uppercase)
    }
}

impl Record for FileEntry {
    fn id(&self) -> RecordId {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
}

impl ImageFormat {
    /// Detect the format from a file name's extension.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Webp => "WEBP",
            ImageFormat::Bmp => "BMP",
        }
    }
}

/// An image stored in the vault's gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub id: RecordId,
    pub name: String,
    pub format: ImageFormat,
    pub payload: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ImageEntry {
    #[must_use]
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }
}

impl Record for ImageEntry {
    fn id(&self) -> RecordId {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

/// A private note. Notes are the only records edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Record for Note {
    fn id(&self) -> RecordId {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        contains_folded(&self.title, needle) || contains_folded(&self.content, needle)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

/// Human-readable byte size ("1.2 MB").
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
