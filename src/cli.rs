//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`OutputFormat`] - `--format` values, convertible into
//!   [`format::OutputFormat`](crate::format::OutputFormat)

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::core::models::OutputConfig;

/// Normalize WhatsApp chat exports into structured JSON, JSONL or CSV.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatscope")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatscope \"WhatsApp Chat with Jane.txt\"
    chatscope chat.txt --media-dir ./media -o jane.json
    chatscope chat.txt --title Jane -f csv -t
    chatscope chat.txt -o messages.jsonl --ids -vv")]
pub struct Args {
    /// Path to the exported chat .txt file
    pub input: PathBuf,

    /// Directory holding the export's media files
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<PathBuf>,

    /// Chat title used for identity resolution (default: derived from the file name)
    #[arg(long, value_name = "NAME")]
    pub title: Option<String>,

    /// Path to output file (default: chat.<format extension>)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (default: detected from --output, else json)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include message IDs in output
    #[arg(long)]
    pub ids: bool,

    /// Omit linked media references from output
    #[arg(long)]
    pub no_media: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the writer configuration from the flags.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            include_timestamps: self.timestamps,
            include_ids: self.ids,
            include_media: !self.no_media,
        }
    }

    /// Default log level for the `-v` count; `RUST_LOG` still overrides it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{ metadata, messages }` document
    #[default]
    Json,

    /// One JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}
