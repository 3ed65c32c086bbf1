//! Normalized message records and chat metadata.
//!
//! This module provides [`Message`], the durable output unit of the parsing
//! pipeline, together with [`MessageType`], [`Timestamp`] and [`ChatMetadata`].
//!
//! # Overview
//!
//! A message consists of:
//! - **Identity**: `id` (index of the header line that opened it)
//! - **Payload**: `sender`, `content`, `kind`
//! - **Flags**: `is_self`, `is_edited`
//! - **Optional**: `media`, attached only by the media linker
//!
//! For attachments `content` holds the file name, not a caption.
//!
//! # Examples
//!
//! ```
//! use chatscope::{Message, MessageType};
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2023, 11, 12, 21, 45, 0).unwrap();
//! let msg = Message::new("John", "photo.jpg")
//!     .with_id(7)
//!     .with_timestamp(ts)
//!     .with_kind(MessageType::Image);
//!
//! assert!(msg.is_attachment());
//! assert!(msg.timestamp.is_resolved());
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::media::MediaRef;

/// Coarse classification of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain (possibly multiline) text
    #[default]
    Text,
    /// Header-shaped event line without a real sender
    System,
    /// Image attachment
    Image,
    /// Video attachment
    Video,
    /// Audio attachment (voice notes included)
    Audio,
    /// Any other attached file
    Document,
    /// Call log entry
    Call,
}

impl MessageType {
    /// Returns `true` for the four attachment kinds the media linker handles.
    pub fn is_attachment(&self) -> bool {
        matches!(
            self,
            MessageType::Image | MessageType::Video | MessageType::Audio | MessageType::Document
        )
    }

    /// Returns the lowercase name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::System => "system",
            MessageType::Image => "image",
            MessageType::Video => "video",
            MessageType::Audio => "audio",
            MessageType::Document => "document",
            MessageType::Call => "call",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a message was sent.
///
/// Exports carry no time zone, so resolved instants are the naive local
/// wall-clock time tagged as UTC.
///
/// A header whose date/time matched none of the configured templates still
/// produces a message; its timestamp is the [`Unresolved`](Timestamp::Unresolved)
/// sentinel holding the raw text.
///
/// Serializes as an RFC 3339 string when resolved, or as `{"raw": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// A successfully parsed instant
    Resolved(DateTime<Utc>),
    /// No date template matched
    Unresolved {
        /// The normalized date+time text that failed to parse
        raw: String,
    },
}

impl Timestamp {
    /// Creates the unresolved sentinel.
    pub fn unresolved(raw: impl Into<String>) -> Self {
        Timestamp::Unresolved { raw: raw.into() }
    }

    /// Returns `true` if the timestamp was resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Timestamp::Resolved(_))
    }

    /// Returns the resolved instant, if any.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Resolved(dt) => Some(*dt),
            Timestamp::Unresolved { .. } => None,
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::unresolved("")
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::Resolved(dt)
    }
}

/// A normalized chat message.
///
/// Created once by [`ChatParser`](crate::parser::ChatParser); the identity
/// resolver and media linker rebuild the sequence rather than editing records
/// a caller already holds.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `u64` | Zero-based index of the header line |
/// | `timestamp` | [`Timestamp`] | Resolved instant or sentinel |
/// | `sender` | `String` | Display label of the author |
/// | `content` | `String` | Body text, or file name for attachments |
/// | `kind` | [`MessageType`] | Serialized as `type` |
/// | `is_self` | `bool` | Authored by the export owner |
/// | `is_edited` | `bool` | Carried the edited marker |
/// | `media` | `Option<MediaRef>` | Linked attachment reference |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Zero-based index of the header line that opened this message.
    pub id: u64,

    /// When the message was sent.
    #[serde(default)]
    pub timestamp: Timestamp,

    /// Display label of the author.
    pub sender: String,

    /// Message body. Never contains zero-width, directional or BOM marks.
    pub content: String,

    /// Message classification.
    #[serde(rename = "type")]
    #[serde(default)]
    pub kind: MessageType,

    /// Whether the export owner wrote this message.
    #[serde(default)]
    pub is_self: bool,

    /// Whether the body ended with the edited marker.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    #[serde(default)]
    pub is_edited: bool,

    /// Reference to linked attachment bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub media: Option<MediaRef>,
}

impl Message {
    /// Creates a text message with only sender and content.
    ///
    /// The id is `0` and the timestamp is the unresolved sentinel.
    ///
    /// ```rust
    /// use chatscope::{Message, MessageType};
    ///
    /// let msg = Message::new("Alice", "Hello!");
    /// assert_eq!(msg.kind, MessageType::Text);
    /// assert!(!msg.timestamp.is_resolved());
    /// ```
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: 0,
            timestamp: Timestamp::default(),
            sender: sender.into(),
            content: content.into(),
            kind: MessageType::Text,
            is_self: false,
            is_edited: false,
            media: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the id.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Builder method to set a resolved timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Timestamp::Resolved(ts);
        self
    }

    /// Builder method to set the message type.
    #[must_use]
    pub fn with_kind(mut self, kind: MessageType) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method to set the self flag.
    #[must_use]
    pub fn with_self(mut self, is_self: bool) -> Self {
        self.is_self = is_self;
        self
    }

    /// Builder method to set the edited flag.
    #[must_use]
    pub fn with_edited(mut self, is_edited: bool) -> Self {
        self.is_edited = is_edited;
        self
    }

    /// Builder method to attach a media reference.
    #[must_use]
    pub fn with_media(mut self, media: MediaRef) -> Self {
        self.media = Some(media);
        self
    }

    /// Returns `true` for image, video, audio and document messages.
    pub fn is_attachment(&self) -> bool {
        self.kind.is_attachment()
    }

    /// Returns `true` for attachments without a linked reference.
    ///
    /// Presentation layers render a "media unavailable" placeholder for these.
    pub fn is_media_missing(&self) -> bool {
        self.is_attachment() && self.media.is_none()
    }
}

/// Metadata derived alongside the message sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatMetadata {
    /// Cleaned export title, usually the counterpart's name.
    pub title: String,
    /// Distinct senders in order of first appearance, excluding the system sender.
    pub participants: Vec<String>,
    /// Number of messages in the sequence.
    pub message_count: usize,
}
