//! Configuration types for the parser.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies. Every lookup table the pipeline
//! consults lives here so it can be substituted in tests:
//!
//! - [`ParserConfig`] - sender labels and the ordered date template list
//! - [`MediaTable`] - file extension lists per attachment kind
//!
//! # Example
//!
//! ```rust
//! use chatscope::config::{MediaTable, ParserConfig};
//! use chatscope::parser::ChatParser;
//!
//! let config = ParserConfig::new()
//!     .with_self_label("Me")
//!     .with_media(MediaTable::new().with_image_extension("heic"));
//!
//! let parser = ChatParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

use crate::message::MessageType;

/// Ordered date/time templates tried by the timestamp resolver.
///
/// The resolver feeds each template the normalized text `"<date> <time>"`
/// (comma removed, lower-case, `p.m.` folded to `pm`) and keeps the first
/// one chrono accepts.
///
/// Day-first templates come before month-first ones, so `03/04/23` resolves
/// to 3 April. That is a deterministic choice, not a correct one for every
/// locale; month-first exports are only recognized when the day-first reading
/// is impossible (e.g. `12/25/23`).
///
/// Within each group two-digit years come first, and the dashed day-first
/// group sits before ISO-like year-first dates: chrono's `%Y` would happily
/// read `23` (or the `12` of `12-11-23`) as a year AD.
pub const DEFAULT_DATE_TEMPLATES: &[&str] = &[
    // 12-hour with seconds
    "%d/%m/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M:%S %p",
    "%d/%m/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    // 12-hour
    "%d/%m/%y %I:%M %p",
    "%m/%d/%y %I:%M %p",
    "%d/%m/%Y %I:%M %p",
    "%m/%d/%Y %I:%M %p",
    // 24-hour with seconds
    "%d/%m/%y %H:%M:%S",
    "%m/%d/%y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    // 24-hour
    "%d/%m/%y %H:%M",
    "%m/%d/%y %H:%M",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M",
    // Year-first
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    // Dotted (EU)
    "%d.%m.%y %I:%M:%S %p",
    "%d.%m.%Y %I:%M:%S %p",
    "%d.%m.%y %I:%M %p",
    "%d.%m.%Y %I:%M %p",
    "%d.%m.%y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%y %H:%M",
    "%d.%m.%Y %H:%M",
    // Dashed, day-first
    "%d-%m-%y %I:%M:%S %p",
    "%d-%m-%Y %I:%M:%S %p",
    "%d-%m-%y %I:%M %p",
    "%d-%m-%Y %I:%M %p",
    "%d-%m-%y %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%y %H:%M",
    "%d-%m-%Y %H:%M",
    // ISO-like
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Configuration for WhatsApp transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatscope::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_placeholder_label("Anonymous")
///     .with_date_templates(["%Y-%m-%d %H:%M"]);
///
/// assert_eq!(config.date_templates.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Generic label the export uses for its owner (default: "You")
    pub self_label: String,

    /// Sender assigned to anonymized or invisible-only sender fields (default: "Hidden")
    pub placeholder_label: String,

    /// Sender assigned to system events (default: "System")
    pub system_label: String,

    /// Ordered chrono templates for timestamp resolution
    pub date_templates: Vec<String>,

    /// Extension lists for attachment classification
    pub media: MediaTable,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            self_label: "You".to_string(),
            placeholder_label: "Hidden".to_string(),
            system_label: "System".to_string(),
            date_templates: DEFAULT_DATE_TEMPLATES
                .iter()
                .map(|t| (*t).to_string())
                .collect(),
            media: MediaTable::default(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the generic self label.
    #[must_use]
    pub fn with_self_label(mut self, label: impl Into<String>) -> Self {
        self.self_label = label.into();
        self
    }

    /// Sets the placeholder label for anonymized senders.
    #[must_use]
    pub fn with_placeholder_label(mut self, label: impl Into<String>) -> Self {
        self.placeholder_label = label.into();
        self
    }

    /// Sets the system sender label.
    #[must_use]
    pub fn with_system_label(mut self, label: impl Into<String>) -> Self {
        self.system_label = label.into();
        self
    }

    /// Replaces the ordered date template list.
    #[must_use]
    pub fn with_date_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_templates = templates.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the media extension table.
    #[must_use]
    pub fn with_media(mut self, media: MediaTable) -> Self {
        self.media = media;
        self
    }

    /// Returns `true` if `sender` is the generic self label (case-insensitive)
    /// or the placeholder.
    pub fn is_self_sender(&self, sender: &str) -> bool {
        sender.eq_ignore_ascii_case(&self.self_label) || sender == self.placeholder_label
    }
}

/// Extension lists used to classify attachments.
///
/// Extensions are stored lower-case without the leading dot. Anything not
/// listed is a [`MessageType::Document`].
///
/// # Example
///
/// ```rust
/// use chatscope::config::MediaTable;
/// use chatscope::MessageType;
///
/// let table = MediaTable::default();
/// assert_eq!(table.classify("JPG"), MessageType::Image);
/// assert_eq!(table.classify_filename("voice.opus"), MessageType::Audio);
/// assert_eq!(table.classify("pdf"), MessageType::Document);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTable {
    /// Image extensions (default: jpg, jpeg, png, webp, gif)
    pub image: Vec<String>,

    /// Video extensions (default: mp4, mov, avi)
    pub video: Vec<String>,

    /// Audio extensions (default: mp3, wav, ogg, m4a, opus)
    pub audio: Vec<String>,
}

impl Default for MediaTable {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|e| (*e).to_string()).collect()
        }

        Self {
            image: owned(&["jpg", "jpeg", "png", "webp", "gif"]),
            video: owned(&["mp4", "mov", "avi"]),
            audio: owned(&["mp3", "wav", "ogg", "m4a", "opus"]),
        }
    }
}

impl MediaTable {
    /// Creates a table with the default extension lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with no extensions; everything classifies as a document.
    pub fn empty() -> Self {
        Self {
            image: Vec::new(),
            video: Vec::new(),
            audio: Vec::new(),
        }
    }

    /// Adds an image extension.
    #[must_use]
    pub fn with_image_extension(mut self, ext: impl AsRef<str>) -> Self {
        self.image.push(normalize_extension(ext.as_ref()));
        self
    }

    /// Adds a video extension.
    #[must_use]
    pub fn with_video_extension(mut self, ext: impl AsRef<str>) -> Self {
        self.video.push(normalize_extension(ext.as_ref()));
        self
    }

    /// Adds an audio extension.
    #[must_use]
    pub fn with_audio_extension(mut self, ext: impl AsRef<str>) -> Self {
        self.audio.push(normalize_extension(ext.as_ref()));
        self
    }

    /// Maps an extension to an attachment kind. Unknown extensions are documents.
    pub fn classify(&self, extension: &str) -> MessageType {
        let ext = normalize_extension(extension);
        let listed = |list: &[String]| list.iter().any(|e| *e == ext);

        if listed(&self.image) {
            MessageType::Image
        } else if listed(&self.video) {
            MessageType::Video
        } else if listed(&self.audio) {
            MessageType::Audio
        } else {
            MessageType::Document
        }
    }

    /// Classifies a file name by the text after its last dot.
    ///
    /// A name without a dot is classified by the whole name, which in practice
    /// means [`MessageType::Document`].
    pub fn classify_filename(&self, filename: &str) -> MessageType {
        let ext = filename.rsplit('.').next().unwrap_or_default();
        self.classify(ext)
    }

    /// Returns `true` if the extension appears in any list.
    pub fn is_known(&self, extension: &str) -> bool {
        self.classify(extension) != MessageType::Document
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
