//! Transcript parser.
//!
//! [`ChatParser`] drives the line scan: every raw line is stripped of
//! invisible marks and either opens a new message (it matches the header
//! grammar) or extends the current one.
//!
//! # Example
//!
//! ```rust
//! use chatscope::parser::ChatParser;
//!
//! let parser = ChatParser::new();
//! let messages = parser.parse_str(
//!     "12/11/23, 9:45 pm - John: Hello\n\
//!      12/11/23, 9:46 pm - You: Hi there!\n\
//!      How are you?",
//! )?;
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].content, "Hi there!\nHow are you?");
//! assert!(messages[1].is_self);
//! # Ok::<(), chatscope::ChatscopeError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::error::{ChatscopeError, Result};
use crate::message::{Message, MessageType, Timestamp};
use crate::parsing::content::{classify_content, strip_edited_marker};
use crate::parsing::header::{ParsedHeader, SenderField, parse_header};
use crate::parsing::text::{is_blank_or_invisible, strip_invisible};
use crate::parsing::timestamp::TimestampResolver;

/// Reads an export file as UTF-8 text.
///
/// # Errors
///
/// - [`ChatscopeError::Io`] if the file can't be read
/// - [`ChatscopeError::Utf8`] if its bytes aren't valid UTF-8
pub fn read_transcript(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| ChatscopeError::utf8(path.display().to_string(), e))
}

/// Parser for WhatsApp "Export Chat" transcripts.
///
/// Stateless between calls; one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses a transcript file.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`read_transcript`] and
    /// [`parse_str`](Self::parse_str).
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let text = read_transcript(path)?;
        self.parse_str(&text).map_err(|e| e.with_path(path))
    }

    /// Parses a transcript held in memory.
    ///
    /// # Errors
    ///
    /// - [`ChatscopeError::EmptyInput`] if `text` is blank
    /// - [`ChatscopeError::NoMessagesRecognized`] if no line is a header
    pub fn parse_str(&self, text: &str) -> Result<Vec<Message>> {
        if is_blank_or_invisible(text) {
            return Err(ChatscopeError::empty_input());
        }

        let resolver = TimestampResolver::new(&self.config.date_templates);
        let lines: Vec<&str> = text.split('\n').collect();
        let last_index = lines.len() - 1;

        let mut messages = Vec::new();
        let mut state = ScanState::NoCurrentMessage;

        for (index, raw) in lines.iter().copied().enumerate() {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            let clean = strip_invisible(raw);
            let trimmed = clean.trim();

            if let Some(header) = parse_header(trimmed) {
                if let ScanState::Accumulating(draft) = state {
                    messages.push(draft.finish());
                }
                state = ScanState::Accumulating(self.open(index as u64, &header, resolver));
                continue;
            }

            match &mut state {
                ScanState::Accumulating(draft) => {
                    if trimmed.is_empty() && index == last_index {
                        continue;
                    }
                    draft.push_line(&clean);
                }
                ScanState::NoCurrentMessage => {
                    if !trimmed.is_empty() {
                        debug!(line = index + 1, "ignoring text before the first message header");
                    }
                }
            }
        }

        if let ScanState::Accumulating(draft) = state {
            messages.push(draft.finish());
        }

        if messages.is_empty() {
            return Err(ChatscopeError::no_messages(lines.len()));
        }

        let unresolved = messages
            .iter()
            .filter(|m| !m.timestamp.is_resolved())
            .count();
        if unresolved > 0 {
            warn!(
                unresolved,
                total = messages.len(),
                "some timestamps matched no date template"
            );
        }
        debug!(lines = lines.len(), messages = messages.len(), "parsed transcript");

        Ok(messages)
    }

    /// Builds the draft for a freshly matched header line.
    fn open(&self, id: u64, header: &ParsedHeader<'_>, resolver: TimestampResolver<'_>) -> MessageDraft {
        let timestamp = resolver.resolve(header.date, header.time);
        if let Timestamp::Unresolved { raw } = &timestamp {
            debug!(line = id + 1, raw = %raw, "unresolved timestamp");
        }

        let (sender, kind, body) = match header.sender {
            SenderField::System => (
                self.config.system_label.clone(),
                MessageType::System,
                header.content,
            ),
            SenderField::Placeholder => {
                let (kind, body) = classify_content(header.content, &self.config.media);
                (self.config.placeholder_label.clone(), kind, body)
            }
            SenderField::Named(name) => {
                let (kind, body) = classify_content(header.content, &self.config.media);
                (name.to_string(), kind, body)
            }
        };

        let is_self = kind != MessageType::System && self.config.is_self_sender(&sender);

        MessageDraft {
            id,
            timestamp,
            sender,
            body: body.to_string(),
            kind,
            is_self,
        }
    }
}

/// Scan loop state.
enum ScanState {
    NoCurrentMessage,
    Accumulating(MessageDraft),
}

/// A message whose body may still grow.
struct MessageDraft {
    id: u64,
    timestamp: Timestamp,
    sender: String,
    body: String,
    kind: MessageType,
    is_self: bool,
}

impl MessageDraft {
    fn push_line(&mut self, line: &str) {
        self.body.push('\n');
        self.body.push_str(line);
    }

    /// Applies body-level classification and freezes the record.
    fn finish(self) -> Message {
        let (content, is_edited) = match self.kind {
            MessageType::Text => match strip_edited_marker(&self.body) {
                Some(stripped) => (stripped.to_string(), true),
                None => (self.body, false),
            },
            _ => (self.body, false),
        };

        Message {
            id: self.id,
            timestamp: self.timestamp,
            sender: self.sender,
            content,
            kind: self.kind,
            is_self: self.is_self,
            is_edited,
            media: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn parse(text: &str) -> Vec<Message> {
        ChatParser::new().parse_str(text).unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let messages = parse(
            "12/11/23, 9:45 pm - John: Hello\n\
             12/11/23, 9:46 pm - You: Hi there!\n\
             How are you?",
        );

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, "John");
        assert_eq!(messages[0].content, "Hello");
        assert!(!messages[0].is_self);
        assert_eq!(messages[1].sender, "You");
        assert_eq!(messages[1].content, "Hi there!\nHow are you?");
        assert!(messages[1].is_self);
    }

    #[test]
    fn test_ids_are_header_line_indices() {
        let messages = parse(
            "12/11/23, 9:45 pm - John: one\n\
             continued\n\
             12/11/23, 9:46 pm - John: two",
        );
        assert_eq!(messages[0].id, 0);
        assert_eq!(messages[1].id, 2);
    }

    #[test]
    fn test_multiline_with_blank_line() {
        let messages = parse("12/11/23, 9:45 pm - A: L1\n\nL3");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "L1\n\nL3");
    }

    #[test]
    fn test_trailing_newline_discarded() {
        let messages = parse("12/11/23, 9:45 pm - A: L1\r\n");
        assert_eq!(messages[0].content, "L1");
    }

    #[test]
    fn test_system_event() {
        let messages = parse("12/11/23, 9:46 pm - John joined using invite link");
        assert_eq!(messages[0].sender, "System");
        assert_eq!(messages[0].kind, MessageType::System);
        assert_eq!(messages[0].content, "John joined using invite link");
        assert!(!messages[0].is_self);
    }

    #[test]
    fn test_attachment_header() {
        let messages = parse("\u{200E}[12/11/23, 9:45:30 pm] John: \u{200E}<attached: image.jpg>");
        assert_eq!(messages[0].kind, MessageType::Image);
        assert_eq!(messages[0].content, "image.jpg");
    }

    #[test]
    fn test_edited_single_line() {
        let messages = parse("12/11/23, 9:45 pm - John: Hello <This message was edited>");
        assert_eq!(messages[0].content, "Hello");
        assert!(messages[0].is_edited);
    }

    #[test]
    fn test_edited_multiline() {
        let messages = parse(
            "12/11/23, 9:45 pm - John: How are you?\n\
             Fine <This message was edited>",
        );
        assert_eq!(messages[0].content, "How are you?\nFine");
        assert!(messages[0].is_edited);
    }

    #[test]
    fn test_bracketed_seconds() {
        let messages = parse("[12/11/23, 9:45:30 pm] John: Hello");
        let ts = messages[0].timestamp.as_datetime().unwrap();
        assert_eq!(ts.second(), 30);
        assert_eq!(messages[0].content, "Hello");
    }

    #[test]
    fn test_placeholder_sender() {
        let messages = parse("12/11/23, 9:45 pm - \u{200E}: Hello");
        assert_eq!(messages[0].sender, "Hidden");
        assert!(messages[0].is_self);
    }

    #[test]
    fn test_self_label_case_insensitive() {
        let messages = parse("12/11/23, 9:45 pm - you: hey");
        assert!(messages[0].is_self);
    }

    #[test]
    fn test_unresolved_timestamp_keeps_message() {
        let messages = parse("99/99/99, 9:45 pm - John: Hello");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "Hello");
        assert!(!messages[0].timestamp.is_resolved());
    }

    #[test]
    fn test_orphan_lines_ignored() {
        let messages = parse("preamble\n\n12/11/23, 9:45 pm - John: Hello");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, 2);
    }

    #[test]
    fn test_line_count_conservation() {
        let text = (0..25)
            .map(|i| format!("12/11/23, 9:{i:02} pm - User{}: message {i}", i % 3))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse(&text).len(), 25);
    }

    #[test]
    fn test_empty_input() {
        let err = ChatParser::new().parse_str("  \n\t\n").unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_no_messages() {
        let err = ChatParser::new()
            .parse_str("just some text\nwith two lines")
            .unwrap_err();
        assert!(err.is_no_messages());
        assert!(matches!(err, ChatscopeError::NoMessagesRecognized { lines: 2 }));
    }

    #[test]
    fn test_custom_labels() {
        let config = ParserConfig::new()
            .with_self_label("Ich")
            .with_system_label("Ereignis");
        let parser = ChatParser::with_config(config);
        let messages = parser
            .parse_str("12/11/23, 9:45 pm - Ich: Hallo\n12/11/23, 9:46 pm - Anna ist beigetreten")
            .unwrap();
        assert!(messages[0].is_self);
        assert_eq!(messages[1].sender, "Ereignis");
    }

    #[test]
    fn test_read_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("chat.txt");
        fs::write(&good, "12/11/23, 9:45 pm - John: Hello").unwrap();
        let bad = dir.path().join("latin1.txt");
        fs::write(&bad, b"12/11/23, 9:45 pm - Jos\xe9: Ol\xe1").unwrap();

        assert_eq!(read_transcript(&good).unwrap(), "12/11/23, 9:45 pm - John: Hello");

        let err = read_transcript(&bad).unwrap_err();
        assert!(err.is_utf8());
        assert!(err.to_string().contains("latin1.txt"));

        let err = ChatParser::new().parse(&bad).unwrap_err();
        assert!(err.is_utf8());

        let err = read_transcript(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.is_io());
    }
}
