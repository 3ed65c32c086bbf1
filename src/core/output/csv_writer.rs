//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::message::{Message, Timestamp};

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Sender`, `Content`, `Type`, `IsSelf`, `Edited`
///   - With IDs: `ID` first
///   - With timestamps: `Timestamp` before `Sender`
///   - With media: `Media` last (linked file name, empty if unlinked)
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
///
/// Same format as `write_csv`, but returns a String instead of writing to file.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, messages, config)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(out: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.extend(["Sender", "Content", "Type", "IsSelf", "Edited"]);

    if config.include_media {
        header.push("Media");
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_ids {
        record.push(msg.id.to_string());
    }
    if config.include_timestamps {
        record.push(match &msg.timestamp {
            Timestamp::Resolved(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            Timestamp::Unresolved { raw } => raw.clone(),
        });
    }

    record.push(msg.sender.clone());
    record.push(msg.content.clone());
    record.push(msg.kind.to_string());
    record.push(msg.is_self.to_string());
    record.push(msg.is_edited.to_string());

    if config.include_media {
        record.push(
            msg.media
                .as_ref()
                .map(|m| m.filename.clone())
                .unwrap_or_default(),
        );
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageType;
    use chrono::TimeZone;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_csv_basic() {
        let messages = vec![
            Message::new("Jane", "Hello"),
            Message::new("You", "Hi there").with_self(true),
        ];

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();
        write_csv(&messages, path, &OutputConfig::new()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("Sender;Content;Type;IsSelf;Edited"));
        assert!(content.contains("Jane;Hello;text;false;false"));
        assert!(content.contains("You;Hi there;text;true;false"));
    }

    #[test]
    fn test_to_csv_with_timestamps_and_ids() {
        let ts = chrono::Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap();
        let messages = vec![
            Message::new("Jane", "Hello").with_id(3).with_timestamp(ts),
            Message {
                timestamp: Timestamp::unresolved("99/99/99 9:45 pm"),
                ..Message::new("Jane", "Lost").with_id(4)
            },
        ];

        let config = OutputConfig::new().with_ids().with_timestamps();
        let content = to_csv(&messages, &config).unwrap();

        assert!(content.contains("ID;Timestamp;Sender;Content"));
        assert!(content.contains("3;2024-06-15 12:30:00;Jane;Hello"));
        assert!(content.contains("4;99/99/99 9:45 pm;Jane;Lost"));
    }

    #[test]
    fn test_to_csv_media_column() {
        let messages = vec![Message::new("Jane", "a.jpg").with_kind(MessageType::Image)];
        let content = to_csv(&messages, &OutputConfig::new().with_media()).unwrap();
        assert!(content.starts_with("Sender;Content;Type;IsSelf;Edited;Media\n"));
        assert!(content.contains("Jane;a.jpg;image;false;false;\n"));
    }

    #[test]
    fn test_multiline_content_is_quoted() {
        let messages = vec![Message::new("Jane", "one\ntwo; three")];
        let content = to_csv(&messages, &OutputConfig::new()).unwrap();
        assert!(content.contains("\"one\ntwo; three\""));
    }
}
