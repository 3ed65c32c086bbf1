//! # chatscope CLI
//!
//! Command-line interface for the chatscope library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatscope::ChatscopeError;
use chatscope::cli::Args;
use chatscope::config::ParserConfig;
use chatscope::core::{MediaLibrary, process_file};
use chatscope::format::{OutputFormat, write_to_format};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(args.log_level().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: &Args) -> Result<(), ChatscopeError> {
    let total_start = Instant::now();
    let (output_path, format) = resolve_output(args)?;

    println!("📦 chatscope v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    if let Some(dir) = &args.media_dir {
        println!("🖼️  Media:   {}", dir.display());
    }
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", format);
    println!();

    let media = match &args.media_dir {
        Some(dir) => {
            println!("⏳ Loading media...");
            let library = MediaLibrary::from_dir(dir)?;
            println!("   {} files", library.len());
            Some(library)
        }
        None => None,
    };

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let chat = process_file(
        &args.input,
        args.title.as_deref(),
        media.as_ref(),
        &ParserConfig::default(),
    )?;
    println!(
        "   Found {} messages ({:.2}s)",
        chat.metadata.message_count,
        parse_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing {}...", format);
    write_to_format(&chat, &output_path, format, &args.output_config())?;

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    let stats = &chat.stats;
    println!();
    println!("📊 Summary:");
    println!("   Title:        {}", chat.metadata.title);
    println!("   Participants: {}", chat.metadata.participants.join(", "));
    println!("   Messages:     {}", stats.message_count);
    println!("   System:       {}", stats.system_messages);
    println!("   Edited:       {}", stats.edited_messages);
    println!(
        "   Attachments:  {} ({} linked)",
        stats.attachments, stats.linked_media
    );

    if stats.has_warnings() {
        println!();
        println!("⚠️  Warnings:");
        if stats.unresolved_timestamps > 0 {
            println!(
                "   {} message(s) have a timestamp that matched no date format",
                stats.unresolved_timestamps
            );
        }
        if stats.ambiguous_identity {
            println!("   Anonymized senders were assigned to \"You\"; check the participant list");
        }
    }

    println!();
    println!(
        "⚡ Total time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Picks the output path and format from `--output` and `--format`.
///
/// An explicit format wins; otherwise the output extension decides, and
/// without either the export is written as `chat.json`.
fn resolve_output(args: &Args) -> Result<(String, OutputFormat), ChatscopeError> {
    let explicit: Option<OutputFormat> = args.format.map(Into::into);

    match (&args.output, explicit) {
        (Some(path), Some(format)) => Ok((path.clone(), format)),
        (Some(path), None) => Ok((path.clone(), OutputFormat::from_path(path)?)),
        (None, format) => {
            let format = format.unwrap_or_default();
            Ok((format!("chat.{}", format.extension()), format))
        }
    }
}
