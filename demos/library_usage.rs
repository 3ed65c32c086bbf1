//! Example: Using chatscope as a library
//!
//! This example demonstrates how to use chatscope in your own projects.
//!
//! Run with: cargo run --example library_usage

use chatscope::core::identity::{collect_participants, derive_title};
use chatscope::prelude::*;

const EXPORT: &str = "\
12/11/23, 9:40 pm - Messages and calls are end-to-end encrypted.
12/11/23, 9:45 pm - \u{200E}: Hello!
12/11/23, 9:46 pm - You: Hi there!
How are you?
12/11/23, 9:47 pm - \u{200E}: \u{200E}<attached: beach.jpg>
12/11/23, 9:48 pm - You: Lovely <This message was edited>
";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chatscope Library Usage Examples ===\n");

    // Example 1: Parse a transcript on its own
    println!("1. Raw parse:");
    let messages = ChatParser::new().parse_str(EXPORT)?;
    for msg in &messages {
        println!(
            "   #{:<2} [{}] {}: {}",
            msg.id,
            msg.kind,
            msg.sender,
            msg.content.replace('\n', " | ")
        );
    }

    // Example 2: Title and participants
    println!("\n2. Title and participants:");
    let title = derive_title("WhatsApp Chat with Jane.txt");
    println!("   Title: {}", title);
    println!("   Raw participants: {:?}", collect_participants(&messages));

    // Example 3: Identity resolution
    println!("\n3. Identity resolution:");
    let participants = collect_participants(&messages);
    let resolved = resolve_identities(messages, &participants, &title, &IdentityConfig::default());
    println!("   Rule: {:?}", resolved.rule);
    println!("   Participants: {:?}", resolved.participants);
    for msg in &resolved.messages {
        println!("   {} (self: {})", msg.sender, msg.is_self);
    }

    // Example 4: The full pipeline with media
    println!("\n4. Full pipeline with a media library:");
    let mut media = MediaLibrary::new();
    let handle = media.insert("beach.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
    let chat = process_export(EXPORT, "WhatsApp Chat with Jane.txt", Some(&media), &ParserConfig::default())?;

    println!("   Messages: {}", chat.metadata.message_count);
    println!("   Linked media: {}", chat.stats.linked_media);
    if let Some(image) = chat.messages.iter().find(|m| m.is_attachment()) {
        if let Some(media_ref) = &image.media {
            println!("   {} -> {} ({} bytes)", image.content, media_ref.handle, media_ref.size);
        }
    }

    // The caller owns the bytes; release them once nothing needs them
    media.release(handle);
    println!("   Released {}, library now holds {} file(s)", handle, media.len());

    // Example 5: Custom configuration
    println!("\n5. Custom labels:");
    let config = ParserConfig::new()
        .with_self_label("Me")
        .with_placeholder_label("Anonymous");
    let custom = ChatParser::with_config(config).parse_str("12/11/23, 9:45 pm - Me: hi")?;
    println!("   {} (self: {})", custom[0].sender, custom[0].is_self);

    // Example 6: Output
    println!("\n6. JSON output:");
    let json = to_format_string(&chat, OutputFormat::Json, &OutputConfig::new().with_timestamps())?;
    println!("{}", json);

    println!("\n=== Examples complete! ===");
    Ok(())
}
