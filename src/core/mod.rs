//! Post-passes, pipeline and writers.
//!
//! This module contains:
//! - [`identity`] - sender identity resolution and title derivation
//! - [`media`] - media library and the media linker
//! - [`processor`] - the full pipeline and [`ProcessingStats`]
//! - [`models`] - [`OutputConfig`]
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatscope::core::{
//!     MediaLibrary, OutputConfig, ParsedChat,
//!     process_export, write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod identity;
pub mod media;
pub mod models;
pub mod output;
pub mod processor;

pub use identity::{
    IdentityConfig, IdentityResolution, IdentityRule, collect_participants, derive_title,
    resolve_identities,
};
pub use media::{LinkReport, MediaHandle, MediaLibrary, MediaRef, link_media};
pub use models::OutputConfig;
pub use processor::{ParsedChat, ProcessingStats, process_export, process_file};

// Re-export Message from the crate root
pub use crate::Message;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
