//! # Chatscope
//!
//! A Rust library for turning WhatsApp "Export chat" transcripts into
//! structured, typed messages.
//!
//! ## Overview
//!
//! A WhatsApp export is a plain-text transcript where every message starts
//! with a header line (`12/11/23, 9:45 pm - John: Hello` on Android,
//! `[12/11/2023, 21:45:03] John: Hello` on iOS) and may continue over
//! further lines. Chatscope:
//!
//! - splits the transcript into messages and resolves their timestamps
//! - recognizes system events, media attachments and edited messages
//! - links attachment references to the exported media files
//! - works out which sender is the exporting user, even when the export
//!   anonymized names
//! - writes the result as JSON, JSON Lines or CSV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatscope::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let media = MediaLibrary::from_dir(Path::new("export/media"))?;
//!     let chat = process_file(
//!         Path::new("export/WhatsApp Chat with Jane.txt"),
//!         None,
//!         Some(&media),
//!         &ParserConfig::default(),
//!     )?;
//!
//!     println!("{} with {:?}", chat.metadata.title, chat.metadata.participants);
//!     write_json(&chat.metadata, &chat.messages, "jane.json", &OutputConfig::all())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing Only
//!
//! [`ChatParser`](parser::ChatParser) runs the transcript pass alone, without
//! media linking or identity resolution:
//!
//! ```rust
//! use chatscope::parser::ChatParser;
//! use chatscope::MessageType;
//!
//! let messages = ChatParser::new()
//!     .parse_str("12/11/23, 9:45 pm - John: Hello\n12/11/23, 9:46 pm - John: IMG-1.jpg (file attached)")
//!     .unwrap();
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].kind, MessageType::Image);
//! assert_eq!(messages[1].content, "IMG-1.jpg");
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser), the transcript scanner
//! - [`parsing`] - header grammar, timestamp resolution, content detection
//! - [`config`] - [`ParserConfig`](config::ParserConfig) and the media extension table
//! - [`core`] - identity resolution, media linking, the pipeline and writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`message`] - [`Message`], [`MessageType`], [`Timestamp`], [`ChatMetadata`]
//! - [`error`] - [`ChatscopeError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatscopeError, Result};
pub use message::{ChatMetadata, Message, MessageType, Timestamp};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatscope::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{ChatMetadata, Message, MessageType, Timestamp};

    pub use crate::error::{ChatscopeError, Result};

    pub use crate::config::{MediaTable, ParserConfig};
    pub use crate::parser::{ChatParser, read_transcript};

    pub use crate::core::identity::{IdentityConfig, IdentityRule, resolve_identities};
    pub use crate::core::media::{MediaHandle, MediaLibrary, MediaRef, link_media};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::processor::{ParsedChat, ProcessingStats, process_export, process_file};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
}
