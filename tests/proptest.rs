//! Property-based tests for chatscope.
//!
//! These tests generate random transcripts to find edge cases.

use proptest::prelude::*;

use chatscope::core::identity::{IdentityConfig, collect_participants, resolve_identities};
use chatscope::parser::ChatParser;
use chatscope::parsing::text::{is_invisible_mark, strip_invisible};
use chatscope::{Message, MessageType};

/// A message the generator knows how to render as a header line.
#[derive(Debug, Clone)]
struct Line {
    sender: String,
    content: String,
    bracketed: bool,
}

fn arb_line() -> impl Strategy<Value = Line> {
    (
        prop::sample::select(vec![
            "Alice".to_string(),
            "Bob".to_string(),
            "You".to_string(),
            "Иван".to_string(),
            "Alice - Work".to_string(),
            "+1 555 0100".to_string(),
        ]),
        prop::sample::select(vec![
            "Hello".to_string(),
            "Hi there!".to_string(),
            "note: colons inside".to_string(),
            "Привет мир".to_string(),
            "🎉🔥💀 emoji".to_string(),
            "Special;chars\"here".to_string(),
            "first\nsecond".to_string(),
            "first\n\nthird".to_string(),
            "meet at\n10:30 - station".to_string(),
        ]),
        any::<bool>(),
    )
        .prop_map(|(sender, content, bracketed)| Line {
            sender,
            content,
            bracketed,
        })
}

fn render(lines: &[Line]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let minute = i % 60;
            if line.bracketed {
                format!("[12/11/2023, 21:{minute:02}:00] {}: {}\n", line.sender, line.content)
            } else {
                format!("12/11/23, 9:{minute:02} pm - {}: {}\n", line.sender, line.content)
            }
        })
        .collect()
}

/// Noise that may contain invisible marks anywhere.
fn arb_noisy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "a", "b", " ", "\n", "\r\n", ":", "-", "[", "]", "12/11/23, ", "9:45 pm", "\u{200E}",
            "\u{FEFF}", "\u{200B}", "<attached: x.jpg>", "<This message was edited>", "é", "🌍",
        ]),
        0..60,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// Every rendered header becomes exactly one message, in order
    #[test]
    fn parse_conserves_messages(lines in prop::collection::vec(arb_line(), 1..30)) {
        let messages = ChatParser::new().parse_str(&render(&lines)).unwrap();

        prop_assert_eq!(messages.len(), lines.len());
        for (msg, line) in messages.iter().zip(&lines) {
            prop_assert_eq!(&msg.sender, &line.sender);
            prop_assert_eq!(&msg.content, &line.content);
            prop_assert_eq!(msg.kind, MessageType::Text);
            prop_assert!(msg.timestamp.is_resolved());
        }
    }

    /// IDs are strictly increasing line indices
    #[test]
    fn parse_ids_increase(lines in prop::collection::vec(arb_line(), 1..30)) {
        let messages = ChatParser::new().parse_str(&render(&lines)).unwrap();
        prop_assert_eq!(messages[0].id, 0);
        for pair in messages.windows(2) {
            prop_assert!(pair[0].id < pair[1].id);
        }
    }

    /// The self flag follows the generic self label
    #[test]
    fn parse_self_flag(lines in prop::collection::vec(arb_line(), 1..30)) {
        let messages = ChatParser::new().parse_str(&render(&lines)).unwrap();
        for msg in &messages {
            prop_assert_eq!(msg.is_self, msg.sender == "You");
        }
    }

    /// Parsing never panics and never leaks invisible marks
    #[test]
    fn parse_never_panics(text in arb_noisy_text()) {
        if let Ok(messages) = ChatParser::new().parse_str(&text) {
            prop_assert!(!messages.is_empty());
            for msg in &messages {
                prop_assert!(!msg.content.chars().any(is_invisible_mark));
                prop_assert!(!msg.sender.chars().any(is_invisible_mark));
            }
        }
    }

    // ============================================
    // TEXT PROPERTIES
    // ============================================

    /// Stripping is idempotent
    #[test]
    fn strip_invisible_idempotent(text in arb_noisy_text()) {
        let once = strip_invisible(&text).into_owned();
        let twice = strip_invisible(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    // ============================================
    // IDENTITY PROPERTIES
    // ============================================

    /// Resolution keeps the sequence length and leaves system messages alone
    #[test]
    fn identity_preserves_sequence(
        senders in prop::collection::vec(
            prop::sample::select(vec!["Hidden", "You", "Jane", "Bob", "System"]),
            0..20,
        ),
        title in prop::sample::select(vec!["", "Jane", "Bob"]),
    ) {
        let messages: Vec<Message> = senders
            .iter()
            .enumerate()
            .map(|(i, sender)| {
                let msg = Message::new(*sender, format!("m{i}")).with_id(i as u64);
                if *sender == "System" {
                    msg.with_kind(MessageType::System)
                } else {
                    msg
                }
            })
            .collect();
        let participants = collect_participants(&messages);

        let resolved = resolve_identities(messages.clone(), &participants, title, &IdentityConfig::default());

        prop_assert_eq!(resolved.messages.len(), messages.len());
        for (after, before) in resolved.messages.iter().zip(&messages) {
            prop_assert_eq!(after.id, before.id);
            prop_assert_eq!(&after.content, &before.content);
            if before.kind == MessageType::System {
                prop_assert_eq!(after, before);
            } else {
                prop_assert_ne!(after.sender.as_str(), "Hidden");
            }
        }

        let mut unique = resolved.participants.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), resolved.participants.len());
        prop_assert!(!resolved.participants.iter().any(|p| p == "Hidden"));
    }
}
