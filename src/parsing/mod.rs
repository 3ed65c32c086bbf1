//! Line-level building blocks used by [`ChatParser`](crate::parser::ChatParser).
//!
//! - [`text`] - invisible-mark stripping
//! - [`header`] - header line grammar
//! - [`timestamp`] - date/time resolution against ordered templates
//! - [`content`] - attachment and edited-marker detection

pub mod content;
pub mod header;
pub mod text;
pub mod timestamp;

pub use content::{AttachmentForm, EDITED_MARKER, classify_content, strip_edited_marker};
pub use header::{HeaderForm, ParsedHeader, SenderField, parse_header};
pub use text::{is_blank_or_invisible, strip_invisible};
pub use timestamp::{TimestampResolver, normalize_meridiem};
