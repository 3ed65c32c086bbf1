//! Header line grammar.
//!
//! A header line starts a new message; anything else continues the previous
//! one. WhatsApp writes headers in two shapes, tried in this order:
//!
//! | Form | Example |
//! |------|---------|
//! | [`HeaderForm::Dashed`] | `12/11/23, 9:45 pm - John: Hello` |
//! | [`HeaderForm::Bracketed`] | `[12/11/23, 9:45:30 pm] John: Hello` |
//!
//! Both accept an optional seconds field and an am/pm marker written as
//! `pm`, `PM`, `p.m.`, with or without a separating (possibly narrow
//! no-break) space. Each form has its own pattern so the accepted shapes
//! can be tested one at a time.
//!
//! A header without a `sender:` colon is a system event
//! (`12/11/23, 9:46 pm - John joined using invite link`); the text that sits
//! where the sender would be is the event description.

use std::sync::OnceLock;

use regex::Regex;

use super::text::is_blank_or_invisible;

/// Numeric date: `12/11/23`, `2023/11/12`, `26.10.2025`, `2023-11-12`.
const DATE: &str = r"(?P<date>\d{1,4}[-./]\d{1,2}[-./]\d{1,4})";

/// Time with optional seconds and am/pm marker.
const TIME: &str = r"(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\s?[ap]\.?\s?m\.?)?)";

/// `sender: content` (the sender may be blank), or a non-empty event text
/// when the colon is missing.
const TAIL: &str = r"(?:(?P<sender>[^:]*):(?:\s(?P<content>.*))?|(?P<event>[^:]*[^:\s][^:]*))$";

/// Shape of a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderForm {
    /// Android style: `date, time - sender: content`
    Dashed,
    /// iOS style: `[date, time] sender: content`
    Bracketed,
}

impl HeaderForm {
    /// Returns all forms in matching order.
    pub fn all() -> &'static [HeaderForm] {
        &[HeaderForm::Dashed, HeaderForm::Bracketed]
    }

    /// Returns the regex source for this form.
    pub fn pattern(self) -> String {
        match self {
            // 12/11/23, 9:45 pm - John: Hello
            HeaderForm::Dashed => format!(r"(?i)^{DATE},?\s{TIME}\s-\s?{TAIL}"),
            // [12/11/23, 9:45:30 pm] John: Hello
            HeaderForm::Bracketed => format!(r"(?i)^\[{DATE},?\s{TIME}\]\s?{TAIL}"),
        }
    }

    fn regex(self) -> &'static Regex {
        static DASHED: OnceLock<Regex> = OnceLock::new();
        static BRACKETED: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            HeaderForm::Dashed => &DASHED,
            HeaderForm::Bracketed => &BRACKETED,
        };
        cell.get_or_init(|| Regex::new(&self.pattern()).expect("valid header regex"))
    }

    /// Matches `line` against this form only.
    pub fn parse(self, line: &str) -> Option<ParsedHeader<'_>> {
        let caps = self.regex().captures(line)?;

        let date = caps.name("date")?.as_str();
        let time = caps.name("time")?.as_str();
        if let Some(event) = caps.name("event") {
            return Some(ParsedHeader {
                form: self,
                date,
                time,
                sender: SenderField::System,
                content: event.as_str().trim(),
            });
        }

        let sender_text = caps.name("sender").map_or("", |m| m.as_str()).trim();
        let sender = if is_blank_or_invisible(sender_text) {
            SenderField::Placeholder
        } else {
            SenderField::Named(sender_text)
        };

        let content = caps.name("content").map_or("", |m| m.as_str());
        let content = if is_blank_or_invisible(content) {
            ""
        } else {
            content
        };

        Some(ParsedHeader {
            form: self,
            date,
            time,
            sender,
            content,
        })
    }
}

/// Who a header line says wrote the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderField<'a> {
    /// A visible sender label
    Named(&'a str),
    /// Empty or invisible-only sender field, resolved later
    Placeholder,
    /// No `sender:` part at all; the line is a system event
    System,
}

/// A successfully matched header line, borrowing from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader<'a> {
    /// Which form matched
    pub form: HeaderForm,
    /// Raw date token
    pub date: &'a str,
    /// Raw time token, including any am/pm marker
    pub time: &'a str,
    /// Sender classification
    pub sender: SenderField<'a>,
    /// Message text, or the event text for system events
    pub content: &'a str,
}

impl ParsedHeader<'_> {
    /// Returns `true` if the line had no `sender:` part.
    pub fn is_system_event(&self) -> bool {
        matches!(self.sender, SenderField::System)
    }
}

/// Matches `line` against every [`HeaderForm`] in order.
///
/// `line` should already be stripped of invisible marks and trimmed.
/// Returns `None` for continuation lines.
///
/// ```rust
/// use chatscope::parsing::header::{parse_header, SenderField};
///
/// let header = parse_header("12/11/23, 9:45 pm - John: Hello world").unwrap();
/// assert_eq!(header.date, "12/11/23");
/// assert_eq!(header.time, "9:45 pm");
/// assert_eq!(header.sender, SenderField::Named("John"));
/// assert_eq!(header.content, "Hello world");
///
/// assert!(parse_header("This is just some random text").is_none());
/// ```
pub fn parse_header(line: &str) -> Option<ParsedHeader<'_>> {
    HeaderForm::all().iter().find_map(|form| form.parse(line))
}
