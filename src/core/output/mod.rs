//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_json`] / [`to_json`] - `{ metadata, messages }` document - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one message per line - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | JSON | Reloading a chat with its metadata |
//! | JSONL | Search indexing, line-oriented tools |
//! | CSV | Spreadsheets, quick inspection |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatscope::Result<()> {
//! use chatscope::config::ParserConfig;
//! use chatscope::core::models::OutputConfig;
//! use chatscope::core::output::{to_csv, write_json, write_jsonl};
//! use chatscope::core::processor::process_export;
//!
//! let chat = process_export(
//!     "12/11/23, 9:45 pm - John: Hello",
//!     "WhatsApp Chat with John.txt",
//!     None,
//!     &ParserConfig::default(),
//! )?;
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_json(&chat.metadata, &chat.messages, "chat.json", &config)?;
//! write_jsonl(&chat.messages, "chat.jsonl", &config)?;
//! let csv_string = to_csv(&chat.messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::core::media::MediaRef;
#[cfg(feature = "json-output")]
use crate::core::models::OutputConfig;
#[cfg(feature = "json-output")]
use crate::message::{Message, MessageType, Timestamp};

/// Message view shared by the JSON writers.
/// Only includes optional fields enabled in `OutputConfig`.
#[cfg(feature = "json-output")]
#[derive(Serialize)]
struct OutputMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<&'a Timestamp>,
    sender: &'a str,
    content: &'a str,
    #[serde(rename = "type")]
    kind: MessageType,
    is_self: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_edited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<&'a MediaRef>,
}

#[cfg(feature = "json-output")]
impl<'a> OutputMessage<'a> {
    fn new(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            id: config.include_ids.then_some(msg.id),
            timestamp: config.include_timestamps.then_some(&msg.timestamp),
            sender: &msg.sender,
            content: &msg.content,
            kind: msg.kind,
            is_self: msg.is_self,
            is_edited: msg.is_edited,
            media: if config.include_media {
                msg.media.as_ref()
            } else {
                None
            },
        }
    }
}
