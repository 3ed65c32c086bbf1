//! Content classification for non-system header lines.
//!
//! Attachment detection looks only at the header line's own content.
//! Edited-marker detection runs later, on the fully accumulated body, since
//! the marker sits at the end of the last continuation line.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::MediaTable;
use crate::message::MessageType;

/// Literal suffix WhatsApp appends to edited messages.
pub const EDITED_MARKER: &str = "<This message was edited>";

/// Attachment conventions seen in exports, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentForm {
    /// iOS: `<attached: 00000012-PHOTO-2023-11-12.jpg>`
    Tagged,
    /// Android: `IMG-20231112-WA0001.jpg (file attached)`
    FileAttached,
    /// Older Android: `IMG-20231112-WA0001.jpg <attached>`
    TrailingTag,
}

impl AttachmentForm {
    /// Returns all forms in matching order.
    pub fn all() -> &'static [AttachmentForm] {
        &[
            AttachmentForm::Tagged,
            AttachmentForm::FileAttached,
            AttachmentForm::TrailingTag,
        ]
    }

    /// Returns the regex source for this form.
    pub fn pattern(self) -> &'static str {
        match self {
            AttachmentForm::Tagged => r"(?i)<attached:\s*(?P<file>.*?)>",
            AttachmentForm::FileAttached => r"(?i)^(?P<file>.*?)\s+\(file attached\)$",
            AttachmentForm::TrailingTag => r"(?i)^(?P<file>.*?)\s+<attached>$",
        }
    }

    fn regex(self) -> &'static Regex {
        static TAGGED: OnceLock<Regex> = OnceLock::new();
        static FILE_ATTACHED: OnceLock<Regex> = OnceLock::new();
        static TRAILING_TAG: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            AttachmentForm::Tagged => &TAGGED,
            AttachmentForm::FileAttached => &FILE_ATTACHED,
            AttachmentForm::TrailingTag => &TRAILING_TAG,
        };
        cell.get_or_init(|| Regex::new(self.pattern()).expect("valid attachment regex"))
    }

    /// Extracts the trimmed file name if `content` uses this form.
    pub fn extract(self, content: &str) -> Option<&str> {
        let file = self.regex().captures(content)?.name("file")?.as_str().trim();
        (!file.is_empty()).then_some(file)
    }
}

/// Returns the attachment file name, if `content` references one.
pub fn detect_attachment(content: &str) -> Option<&str> {
    AttachmentForm::all()
        .iter()
        .find_map(|form| form.extract(content))
}

/// Decides the message type and canonical content of a header's text.
///
/// Attachments become their [`MediaTable`] kind with the file name as
/// content; everything else is [`MessageType::Text`] with the text as-is.
///
/// ```rust
/// use chatscope::config::MediaTable;
/// use chatscope::parsing::content::classify_content;
/// use chatscope::MessageType;
///
/// let table = MediaTable::default();
/// assert_eq!(
///     classify_content("video.mp4 (file attached)", &table),
///     (MessageType::Video, "video.mp4")
/// );
/// assert_eq!(classify_content("Hello", &table), (MessageType::Text, "Hello"));
/// ```
pub fn classify_content<'a>(content: &'a str, media: &MediaTable) -> (MessageType, &'a str) {
    match detect_attachment(content) {
        Some(file) => (media.classify_filename(file), file),
        None => (MessageType::Text, content),
    }
}

/// Strips a trailing [`EDITED_MARKER`] from an accumulated body.
///
/// Returns the body without the marker and the whitespace before it, or
/// `None` if the body isn't marked.
///
/// ```rust
/// use chatscope::parsing::content::strip_edited_marker;
///
/// assert_eq!(
///     strip_edited_marker("How are you?\nFine <This message was edited>"),
///     Some("How are you?\nFine")
/// );
/// assert_eq!(strip_edited_marker("Hello"), None);
/// ```
pub fn strip_edited_marker(body: &str) -> Option<&str> {
    body.trim_end()
        .strip_suffix(EDITED_MARKER)
        .map(str::trim_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_attachment() {
        let table = MediaTable::default();
        assert_eq!(
            classify_content("<attached: image.jpg>", &table),
            (MessageType::Image, "image.jpg")
        );
        assert_eq!(
            classify_content("<attached: 00000012-AUDIO-2023-11-12.opus>", &table),
            (MessageType::Audio, "00000012-AUDIO-2023-11-12.opus")
        );
    }

    #[test]
    fn test_file_attached() {
        let table = MediaTable::default();
        assert_eq!(
            classify_content("video.mp4 (file attached)", &table),
            (MessageType::Video, "video.mp4")
        );
        assert_eq!(
            classify_content("Report Q3.PDF (File Attached)", &table),
            (MessageType::Document, "Report Q3.PDF")
        );
    }

    #[test]
    fn test_trailing_tag() {
        let table = MediaTable::default();
        assert_eq!(
            classify_content("document.pdf <attached>", &table),
            (MessageType::Document, "document.pdf")
        );
    }

    #[test]
    fn test_each_form_matches_only_its_shape() {
        assert_eq!(AttachmentForm::Tagged.extract("<attached: a.jpg>"), Some("a.jpg"));
        assert_eq!(AttachmentForm::FileAttached.extract("<attached: a.jpg>"), None);
        assert_eq!(AttachmentForm::TrailingTag.extract("a.jpg (file attached)"), None);
        assert_eq!(AttachmentForm::TrailingTag.extract("a.jpg <attached>"), Some("a.jpg"));
    }

    #[test]
    fn test_plain_text_not_attachment() {
        let table = MediaTable::default();
        assert_eq!(
            classify_content("I attached the file yesterday", &table),
            (MessageType::Text, "I attached the file yesterday")
        );
        assert_eq!(
            classify_content("<Media omitted>", &table),
            (MessageType::Text, "<Media omitted>")
        );
        assert_eq!(detect_attachment("<attached: >"), None);
    }

    #[test]
    fn test_substituted_media_table() {
        let table = MediaTable::empty();
        assert_eq!(
            classify_content("<attached: image.jpg>", &table),
            (MessageType::Document, "image.jpg")
        );
    }

    #[test]
    fn test_strip_edited_single_line() {
        assert_eq!(
            strip_edited_marker("Hello <This message was edited>"),
            Some("Hello")
        );
        assert_eq!(strip_edited_marker("<This message was edited>"), Some(""));
    }

    #[test]
    fn test_strip_edited_multiline_and_trailing_space() {
        assert_eq!(
            strip_edited_marker("How are you?\nFine <This message was edited>  "),
            Some("How are you?\nFine")
        );
    }

    #[test]
    fn test_marker_must_be_suffix() {
        assert_eq!(
            strip_edited_marker("<This message was edited> but more"),
            None
        );
    }
}
