//! The full export pipeline: parse, link media, resolve identities.
//!
//! Every stage is a pure function of its input; [`process_export`] only
//! chains them and gathers [`ProcessingStats`].

use std::path::Path;

use tracing::info;

use super::identity::{IdentityConfig, IdentityRule, collect_participants, derive_title, resolve_identities};
use super::media::{MediaLibrary, link_media};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::message::{ChatMetadata, Message, MessageType};
use crate::parser::{ChatParser, read_transcript};

/// A fully processed chat.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedChat {
    /// Title, participants and message count
    pub metadata: ChatMetadata,
    /// Messages in transcript order
    pub messages: Vec<Message>,
    /// Aggregate data-quality counters
    pub stats: ProcessingStats,
}

/// Counters for the non-fatal conditions a run can hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub message_count: usize,
    pub system_messages: usize,
    /// Image, video, audio and document messages
    pub attachments: usize,
    /// Attachments that received a media reference
    pub linked_media: usize,
    /// Messages carrying the unresolved-timestamp sentinel
    pub unresolved_timestamps: usize,
    pub edited_messages: usize,
    /// Identity rule that applied, if any
    pub identity_rule: Option<IdentityRule>,
    /// Leftover anonymized senders were mapped to the self label
    pub ambiguous_identity: bool,
}

impl ProcessingStats {
    /// Counts the per-message conditions in `messages`.
    pub fn from_messages(messages: &[Message]) -> Self {
        let mut stats = Self {
            message_count: messages.len(),
            ..Self::default()
        };

        for msg in messages {
            if msg.kind == MessageType::System {
                stats.system_messages += 1;
            }
            if msg.is_attachment() {
                stats.attachments += 1;
                if msg.media.is_some() {
                    stats.linked_media += 1;
                }
            }
            if !msg.timestamp.is_resolved() {
                stats.unresolved_timestamps += 1;
            }
            if msg.is_edited {
                stats.edited_messages += 1;
            }
        }

        stats
    }

    /// Attachments left without a media reference.
    pub fn missing_media(&self) -> usize {
        self.attachments - self.linked_media
    }

    /// Returns `true` if any data-quality warning was raised.
    pub fn has_warnings(&self) -> bool {
        self.unresolved_timestamps > 0 || self.ambiguous_identity
    }
}

/// Runs the whole pipeline on an in-memory transcript.
///
/// `file_name` is the export's file name (or an explicit title); it is
/// cleaned with [`derive_title`] and drives identity resolution. Without a
/// `media` library every attachment stays unlinked.
///
/// # Errors
///
/// Returns [`EmptyInput`](crate::ChatscopeError::EmptyInput) or
/// [`NoMessagesRecognized`](crate::ChatscopeError::NoMessagesRecognized)
/// from the parser.
///
/// # Example
///
/// ```rust
/// use chatscope::config::ParserConfig;
/// use chatscope::core::processor::process_export;
///
/// let text = "12/11/23, 9:45 pm - : Hi!\n12/11/23, 9:46 pm - You: Hello";
/// let chat = process_export(text, "WhatsApp Chat with Jane.txt", None, &ParserConfig::default())?;
///
/// assert_eq!(chat.metadata.title, "Jane");
/// assert_eq!(chat.metadata.participants, vec!["Jane", "You"]);
/// assert_eq!(chat.messages[0].sender, "Jane");
/// # Ok::<(), chatscope::ChatscopeError>(())
/// ```
pub fn process_export(
    text: &str,
    file_name: &str,
    media: Option<&MediaLibrary>,
    config: &ParserConfig,
) -> Result<ParsedChat> {
    let messages = ChatParser::with_config(config.clone()).parse_str(text)?;

    let messages = match media {
        Some(library) => {
            let (linked, report) = link_media(messages, library);
            if !report.missing.is_empty() {
                info!(
                    linked = report.linked,
                    missing = report.missing.len(),
                    "some attachments have no matching media file"
                );
            }
            linked
        }
        None => messages,
    };

    let title = derive_title(file_name);
    let participants = collect_participants(&messages);
    let resolution = resolve_identities(
        messages,
        &participants,
        &title,
        &IdentityConfig::from(config),
    );

    let mut stats = ProcessingStats::from_messages(&resolution.messages);
    stats.identity_rule = resolution.rule;
    stats.ambiguous_identity = resolution.ambiguous;

    let metadata = ChatMetadata {
        title,
        participants: resolution.participants,
        message_count: resolution.messages.len(),
    };

    Ok(ParsedChat {
        metadata,
        messages: resolution.messages,
        stats,
    })
}

/// Reads an export file and runs [`process_export`] on it.
///
/// The title comes from `title` when given, otherwise from the file name.
pub fn process_file(
    path: &Path,
    title: Option<&str>,
    media: Option<&MediaLibrary>,
    config: &ParserConfig,
) -> Result<ParsedChat> {
    let text = read_transcript(path)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    process_export(&text, title.unwrap_or(&file_name), media, config)
        .map_err(|e| e.with_path(path))
}
