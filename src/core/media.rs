//! Attachment bytes and the media linker post-pass.
//!
//! [`MediaLibrary`] is the caller-owned `filename -> bytes` store an archive
//! extractor fills before linking. [`link_media`] never copies bytes into
//! messages; it hands out [`MediaRef`]s that stay valid until the caller
//! [releases](MediaLibrary::release) the handle.
//!
//! # Example
//!
//! ```rust
//! use chatscope::core::media::{MediaLibrary, link_media};
//! use chatscope::{Message, MessageType};
//!
//! let mut library = MediaLibrary::new();
//! let handle = library.insert("photo.jpg", vec![0xFF, 0xD8, 0xFF]);
//!
//! let messages = vec![
//!     Message::new("John", "photo.jpg").with_kind(MessageType::Image),
//!     Message::new("John", "clip.mp4").with_kind(MessageType::Video),
//! ];
//! let (linked, report) = link_media(messages, &library);
//!
//! assert_eq!(linked[0].media.as_ref().unwrap().handle, handle);
//! assert!(linked[1].is_media_missing());
//! assert_eq!(report.missing, vec!["clip.mp4".to_string()]);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Message;
use crate::error::Result;

/// Opaque, short-lived reference to bytes held by a [`MediaLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaHandle(u64);

impl MediaHandle {
    /// Returns the raw handle value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media:{}", self.0)
    }
}

/// Reference the linker attaches to an attachment message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Handle to resolve the bytes through the library
    pub handle: MediaHandle,
    /// File name the message referenced
    pub filename: String,
    /// Size of the linked file in bytes
    pub size: u64,
}

#[derive(Debug, Clone)]
struct MediaEntry {
    handle: MediaHandle,
    bytes: Vec<u8>,
}

/// Caller-owned store of attachment bytes, keyed by exact file name.
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    entries: BTreeMap<String, MediaEntry>,
    next_handle: u64,
}

impl MediaLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every regular file directly inside `dir`.
    ///
    /// Subdirectories and names that aren't valid UTF-8 are skipped.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut library = Self::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                debug!(path = %entry.path().display(), "skipping non UTF-8 media file name");
                continue;
            };
            let bytes = fs::read(entry.path())?;
            library.insert(name, bytes);
        }

        debug!(dir = %dir.display(), files = library.len(), "loaded media directory");
        Ok(library)
    }

    /// Stores `bytes` under `filename` and returns its handle.
    ///
    /// Re-inserting a name replaces the bytes and issues a fresh handle.
    pub fn insert(&mut self, filename: impl Into<String>, bytes: Vec<u8>) -> MediaHandle {
        let handle = MediaHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.insert(filename.into(), MediaEntry { handle, bytes });
        handle
    }

    /// Returns the bytes stored under `filename`.
    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.entries.get(filename).map(|e| e.bytes.as_slice())
    }

    /// Returns the bytes a handle points at, if it hasn't been released.
    pub fn resolve(&self, handle: MediaHandle) -> Option<&[u8]> {
        self.entries
            .values()
            .find(|e| e.handle == handle)
            .map(|e| e.bytes.as_slice())
    }

    /// Builds the reference for `filename`, if present.
    pub fn reference(&self, filename: &str) -> Option<MediaRef> {
        self.entries.get(filename).map(|e| MediaRef {
            handle: e.handle,
            filename: filename.to_string(),
            size: e.bytes.len() as u64,
        })
    }

    /// Drops the bytes behind `handle`. Returns `false` if it was already gone.
    pub fn release(&mut self, handle: MediaHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.handle != handle);
        self.entries.len() != before
    }

    /// Drops every stored file.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns stored file names in sorted order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of stored files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a [`link_media`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Attachments that received a reference
    pub linked: usize,
    /// File names of attachments with no matching file, in message order
    pub missing: Vec<String>,
}

/// Attaches a [`MediaRef`] to every attachment whose file name is in `library`.
///
/// Text, system and call messages pass through untouched. Unmatched
/// attachments keep their type and stay without a reference.
pub fn link_media(messages: Vec<Message>, library: &MediaLibrary) -> (Vec<Message>, LinkReport) {
    let mut report = LinkReport::default();

    let linked = messages
        .into_iter()
        .map(|msg| {
            if !msg.is_attachment() {
                return msg;
            }
            match library.reference(&msg.content) {
                Some(media) => {
                    report.linked += 1;
                    msg.with_media(media)
                }
                None => {
                    report.missing.push(msg.content.clone());
                    msg
                }
            }
        })
        .collect();

    (linked, report)
}
