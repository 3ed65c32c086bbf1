//! Unified error types for chatscope.
//!
//! This module provides a single [`ChatscopeError`] enum that covers every
//! error the library can surface to a caller.
//!
//! # What is (and is not) an error
//!
//! Only two conditions abort a parse:
//! - [`ChatscopeError::EmptyInput`] - the transcript is empty or whitespace-only
//! - [`ChatscopeError::NoMessagesRecognized`] - no line matched the header grammar
//!
//! Everything else degrades gracefully and is carried in the output data:
//! a header whose date/time cannot be resolved still produces a message with
//! [`Timestamp::Unresolved`](crate::message::Timestamp::Unresolved), and the
//! identity resolver's last-resort rule is reported through
//! [`ProcessingStats`](crate::core::processor::ProcessingStats).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatscope operations.
///
/// # Example
///
/// ```rust
/// use chatscope::error::Result;
/// use chatscope::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatscopeError>;

/// The error type for all chatscope operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatscopeError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export file doesn't exist
    /// - The media directory can't be read
    /// - The output file can't be written
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The supplied transcript is empty or contains only whitespace.
    #[error("The chat text is empty{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    EmptyInput {
        /// The file path, if the text came from a file
        path: Option<PathBuf>,
    },

    /// Parsing finished without recognizing a single message header.
    ///
    /// Distinct from [`EmptyInput`](ChatscopeError::EmptyInput): the text has
    /// content, it just isn't a chat export.
    #[error(
        "Could not find any valid WhatsApp messages in {lines} line(s). \
         Make sure the file is a WhatsApp \"Export Chat\" transcript"
    )]
    NoMessagesRecognized {
        /// Number of raw lines that were scanned
        lines: usize,
    },

    /// The input or a requested output doesn't have the expected shape.
    ///
    /// This occurs when the output path has an unknown extension.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatscopeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatscopeError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatscopeError {
    /// Creates an empty-input error without a file path.
    pub fn empty_input() -> Self {
        ChatscopeError::EmptyInput { path: None }
    }

    /// Creates an empty-input error for a file.
    pub fn empty_file(path: impl Into<PathBuf>) -> Self {
        ChatscopeError::EmptyInput {
            path: Some(path.into()),
        }
    }

    /// Creates a no-messages error.
    pub fn no_messages(lines: usize) -> Self {
        ChatscopeError::NoMessagesRecognized { lines }
    }

    /// Creates a UTF-8 error for the given context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatscopeError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatscopeError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Attaches a file path to an [`EmptyInput`](ChatscopeError::EmptyInput)
    /// error; other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            ChatscopeError::EmptyInput { path: None } => ChatscopeError::EmptyInput {
                path: Some(path.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatscopeError::Io(_))
    }

    /// Returns `true` if the input text was empty.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ChatscopeError::EmptyInput { .. })
    }

    /// Returns `true` if no message header was recognized.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, ChatscopeError::NoMessagesRecognized { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatscopeError::InvalidFormat { .. })
    }

    /// Returns `true` if some text wasn't valid UTF-8.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatscopeError::Utf8 { .. })
    }
}
