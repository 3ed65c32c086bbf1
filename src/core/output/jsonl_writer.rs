//! JSON Lines (JSONL) output writer.
//!
//! One message per line, no chat metadata. Suited to search indexing and
//! line-oriented tools.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::OutputMessage;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::Message;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"Jane","content":"Hi","type":"text","is_self":false}
/// {"sender":"You","content":"Hello","type":"text","is_self":true}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for msg in messages {
        let line = serde_json::to_string(&OutputMessage::new(msg, config))?;
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
///
/// Same format as `write_jsonl`, every line terminated by `\n`.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut out = String::new();
    for msg in messages {
        out.push_str(&serde_json::to_string(&OutputMessage::new(msg, config))?);
        out.push('\n');
    }
    Ok(out)
}
