//! Output configuration shared by the writers.

/// Controls which optional fields the writers emit.
///
/// `sender`, `content`, `type` and `is_self` are always written.
///
/// # Example
///
/// ```rust
/// use chatscope::core::models::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps().with_ids();
/// assert!(config.include_timestamps);
/// assert!(!config.include_media);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputConfig {
    /// Include timestamps in output
    pub include_timestamps: bool,
    /// Include message IDs in output
    pub include_ids: bool,
    /// Include linked media references in output
    pub include_media: bool,
}

impl OutputConfig {
    /// Creates a config that writes only the required fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that writes every optional field.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_ids: true,
            include_media: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    #[must_use]
    pub fn with_media(mut self) -> Self {
        self.include_media = true;
        self
    }
}
