//! Tests for the output writers on fully processed chats.

use chatscope::core::{MediaLibrary, OutputConfig, ParsedChat, process_export};
use chatscope::format::{OutputFormat, to_format_string};
use chatscope::config::ParserConfig;

const CHAT: &str = "\
12/11/23, 9:40 pm - Messages and calls are end-to-end encrypted.
12/11/23, 9:45 pm - \u{200E}: Hello; world
12/11/23, 9:46 pm - You: \"Quoted\" reply
second line
12/11/23, 9:47 pm - \u{200E}: <attached: photo.jpg>
12/11/23, 9:48 pm - You: Fine <This message was edited>
99/99/99, 9:49 pm - You: lost in time
";

fn chat() -> ParsedChat {
    let mut media = MediaLibrary::new();
    media.insert("photo.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
    process_export(
        CHAT,
        "WhatsApp Chat with Jane.txt",
        Some(&media),
        &ParserConfig::default(),
    )
    .unwrap()
}

fn render(format: OutputFormat, config: &OutputConfig) -> String {
    to_format_string(&chat(), format, config).unwrap()
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_metadata() {
    let value: serde_json::Value =
        serde_json::from_str(&render(OutputFormat::Json, &OutputConfig::new())).unwrap();

    assert_eq!(value["metadata"]["title"], "Jane");
    assert_eq!(value["metadata"]["participants"], serde_json::json!(["Jane", "You"]));
    assert_eq!(value["metadata"]["message_count"], 6);
}

#[test]
fn test_json_minimal_fields() {
    let value: serde_json::Value =
        serde_json::from_str(&render(OutputFormat::Json, &OutputConfig::new())).unwrap();
    let first = &value["messages"][1];

    assert_eq!(first["sender"], "Jane");
    assert_eq!(first["content"], "Hello; world");
    assert_eq!(first["type"], "text");
    assert_eq!(first["is_self"], false);
    assert!(first.get("id").is_none());
    assert!(first.get("timestamp").is_none());
    assert!(first.get("is_edited").is_none());
    assert!(value["messages"][3].get("media").is_none());
}

#[test]
fn test_json_all_fields() {
    let value: serde_json::Value =
        serde_json::from_str(&render(OutputFormat::Json, &OutputConfig::all())).unwrap();
    let messages = value["messages"].as_array().unwrap();

    assert_eq!(messages[0]["type"], "system");
    assert_eq!(messages[0]["sender"], "System");
    assert_eq!(messages[1]["id"], 1);
    assert_eq!(messages[1]["timestamp"], "2023-11-12T21:45:00Z");
    assert_eq!(messages[3]["type"], "image");
    assert_eq!(messages[3]["media"]["filename"], "photo.jpg");
    assert_eq!(messages[3]["media"]["size"], 4);
    assert_eq!(messages[4]["content"], "Fine");
    assert_eq!(messages[4]["is_edited"], true);
    assert_eq!(messages[5]["timestamp"], serde_json::json!({"raw": "99/99/99 9:49 pm"}));
}

// ============================================================================
// JSONL
// ============================================================================

#[test]
fn test_jsonl_one_object_per_message() {
    let out = render(OutputFormat::Jsonl, &OutputConfig::new().with_ids());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);

    let ids: Vec<u64> = lines
        .iter()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 4, 5, 6]);

    let multiline: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
    assert_eq!(multiline["content"], "\"Quoted\" reply\nsecond line");
}

#[test]
fn test_jsonl_has_no_metadata() {
    let out = render(OutputFormat::Jsonl, &OutputConfig::all());
    assert!(!out.contains("\"metadata\""));
    assert!(!out.contains("participants"));
}

// ============================================================================
// CSV
// ============================================================================

fn read_csv(text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(text.as_bytes());
    let header = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

#[test]
fn test_csv_basic_columns() {
    let (header, rows) = read_csv(&render(OutputFormat::Csv, &OutputConfig::new()));

    assert_eq!(header, vec!["Sender", "Content", "Type", "IsSelf", "Edited"]);
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[1], vec!["Jane", "Hello; world", "text", "false", "false"]);
    assert_eq!(rows[2][1], "\"Quoted\" reply\nsecond line");
    assert_eq!(rows[4], vec!["You", "Fine", "text", "true", "true"]);
}

#[test]
fn test_csv_all_columns() {
    let (header, rows) = read_csv(&render(OutputFormat::Csv, &OutputConfig::all()));

    assert_eq!(
        header,
        vec!["ID", "Timestamp", "Sender", "Content", "Type", "IsSelf", "Edited", "Media"]
    );
    assert_eq!(rows[1][0], "1");
    assert_eq!(rows[1][1], "2023-11-12 21:45:00");
    assert_eq!(rows[3][7], "photo.jpg");
    assert_eq!(rows[4][7], "");
    assert_eq!(rows[5][1], "99/99/99 9:49 pm");
}

#[test]
fn test_csv_system_row() {
    let (_, rows) = read_csv(&render(OutputFormat::Csv, &OutputConfig::new()));
    assert_eq!(
        rows[0],
        vec![
            "System",
            "Messages and calls are end-to-end encrypted.",
            "system",
            "false",
            "false"
        ]
    );
}
