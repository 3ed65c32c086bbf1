//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use super::OutputMessage;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::{ChatMetadata, Message};

#[derive(Serialize)]
struct JsonExport<'a> {
    metadata: &'a ChatMetadata,
    messages: Vec<OutputMessage<'a>>,
}

/// Writes a chat to a JSON file.
///
/// # Format
/// ```json
/// {
///   "metadata": {"title": "Jane", "participants": ["Jane", "You"], "message_count": 2},
///   "messages": [
///     {"sender": "Jane", "content": "Hi", "type": "text", "is_self": false},
///     {"sender": "You", "content": "Hello", "type": "text", "is_self": true}
///   ]
/// }
/// ```
pub fn write_json(
    metadata: &ChatMetadata,
    messages: &[Message],
    output_path: &str,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(metadata, messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts a chat to a pretty-printed JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(metadata: &ChatMetadata, messages: &[Message], config: &OutputConfig) -> Result<String> {
    let export = JsonExport {
        metadata,
        messages: messages
            .iter()
            .map(|m| OutputMessage::new(m, config))
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&export)?)
}
