//! Sender identity resolution.
//!
//! Exports name their owner with a generic label ("You") and sometimes
//! anonymize the other side into an empty sender field, which the parser maps
//! to a placeholder ("Hidden"). This post-pass rewrites those labels using
//! the export's title, which WhatsApp derives from the counterpart's name.
//!
//! The rules are a heuristic. They are tried in [`IdentityConfig::rules`]
//! order and the first one that applies wins; afterwards any placeholder
//! still left is mapped to the self label. That last step is reported as
//! ambiguous because group chats with anonymized senders have no reliable
//! answer.
//!
//! # Example
//!
//! ```rust
//! use chatscope::core::identity::{IdentityConfig, IdentityRule, resolve_identities};
//! use chatscope::Message;
//!
//! let messages = vec![
//!     Message::new("Hidden", "Hi!").with_self(true),
//!     Message::new("You", "Hello").with_self(true),
//! ];
//! let participants = vec!["Hidden".to_string(), "You".to_string()];
//!
//! let resolved = resolve_identities(messages, &participants, "Jane", &IdentityConfig::default());
//! assert_eq!(resolved.rule, Some(IdentityRule::PlaceholderAndSelf));
//! assert_eq!(resolved.messages[0].sender, "Jane");
//! assert!(!resolved.messages[0].is_self);
//! assert_eq!(resolved.participants, vec!["Jane", "You"]);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::message::{Message, MessageType};

/// A title-or-participant rule, tried in configured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityRule {
    /// Two senders, the placeholder and the self label: the placeholder is
    /// the counterpart named by the title.
    PlaceholderAndSelf,
    /// The placeholder is the only sender: every message is the counterpart's.
    PlaceholderOnly,
    /// Two named senders, one matching the title: the other one is self.
    TitleMatch,
    /// Two senders otherwise: the named one is the counterpart.
    NamedCounterpart,
}

impl IdentityRule {
    /// Returns all rules in default precedence.
    pub fn all() -> &'static [IdentityRule] {
        &[
            IdentityRule::PlaceholderAndSelf,
            IdentityRule::PlaceholderOnly,
            IdentityRule::TitleMatch,
            IdentityRule::NamedCounterpart,
        ]
    }
}

/// Labels and rule order for [`resolve_identities`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Generic label for the export owner (default: "You")
    pub self_label: String,
    /// Label of anonymized senders (default: "Hidden")
    pub placeholder_label: String,
    /// Rules in precedence order. The placeholder fallback always runs last.
    pub rules: Vec<IdentityRule>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            self_label: "You".to_string(),
            placeholder_label: "Hidden".to_string(),
            rules: IdentityRule::all().to_vec(),
        }
    }
}

impl IdentityConfig {
    /// Creates a configuration with default labels and rule order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rule list.
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = IdentityRule>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }

    fn is_placeholder(&self, sender: &str) -> bool {
        sender == self.placeholder_label
    }

    fn is_self_label(&self, sender: &str) -> bool {
        sender.eq_ignore_ascii_case(&self.self_label)
    }
}

impl From<&ParserConfig> for IdentityConfig {
    fn from(config: &ParserConfig) -> Self {
        Self {
            self_label: config.self_label.clone(),
            placeholder_label: config.placeholder_label.clone(),
            rules: IdentityRule::all().to_vec(),
        }
    }
}

/// Result of [`resolve_identities`].
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityResolution {
    /// Rebuilt message sequence
    pub messages: Vec<Message>,
    /// Final participant list, in first-appearance order, without duplicates
    pub participants: Vec<String>,
    /// The rule that applied, if any
    pub rule: Option<IdentityRule>,
    /// `true` if leftover placeholders had to be mapped to the self label
    pub ambiguous: bool,
}

/// Cleans an export file name into a chat title.
///
/// Drops directories, a leading `WhatsApp Chat with ` / `WhatsApp Chat - `,
/// and a trailing `.txt` / `.zip`.
///
/// ```rust
/// use chatscope::core::identity::derive_title;
///
/// assert_eq!(derive_title("WhatsApp Chat with Jane Doe.txt"), "Jane Doe");
/// assert_eq!(derive_title("exports/WhatsApp Chat - Family.zip"), "Family");
/// assert_eq!(derive_title("notes.md"), "notes.md");
/// ```
pub fn derive_title(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(file_name);

    let title = base
        .strip_prefix("WhatsApp Chat with ")
        .or_else(|| base.strip_prefix("WhatsApp Chat - "))
        .unwrap_or(base);
    let title = title
        .strip_suffix(".txt")
        .or_else(|| title.strip_suffix(".zip"))
        .unwrap_or(title);

    title.trim().to_string()
}

/// Distinct senders in order of first appearance, excluding system events.
pub fn collect_participants(messages: &[Message]) -> Vec<String> {
    let mut participants: Vec<String> = Vec::new();
    for msg in messages {
        if msg.kind != MessageType::System && !participants.contains(&msg.sender) {
            participants.push(msg.sender.clone());
        }
    }
    participants
}

/// Rewrites placeholder and self senders using the chat title.
///
/// `participants` is the distinct non-system sender list as produced by
/// [`collect_participants`]. Rules that need the title are skipped when it is
/// blank.
pub fn resolve_identities(
    messages: Vec<Message>,
    participants: &[String],
    title: &str,
    config: &IdentityConfig,
) -> IdentityResolution {
    let title = title.trim();
    let rule = config
        .rules
        .iter()
        .copied()
        .find(|rule| applies(*rule, participants, title, config));

    let (messages, mut final_participants) = match rule {
        Some(rule) => {
            debug!(?rule, participants = participants.len(), "identity rule applied");
            apply(rule, messages, participants, title, config)
        }
        None => (messages, participants.to_vec()),
    };

    // Placeholder fallback
    let mut ambiguous = false;
    let messages = rebuild(messages, |msg| {
        if config.is_placeholder(&msg.sender) {
            msg.sender.clone_from(&config.self_label);
            msg.is_self = true;
            ambiguous = true;
        }
    });
    if ambiguous {
        warn!(
            participants = participants.len(),
            "anonymized senders mapped to the self label; identity is a guess"
        );
    }

    for p in &mut final_participants {
        if config.is_placeholder(p) {
            p.clone_from(&config.self_label);
        }
    }
    dedup_in_order(&mut final_participants);

    IdentityResolution {
        messages,
        participants: final_participants,
        rule,
        ambiguous,
    }
}

fn applies(rule: IdentityRule, participants: &[String], title: &str, config: &IdentityConfig) -> bool {
    let has_placeholder = participants.iter().any(|p| config.is_placeholder(p));

    match rule {
        IdentityRule::PlaceholderAndSelf => {
            !title.is_empty()
                && participants.len() == 2
                && has_placeholder
                && participants.iter().any(|p| config.is_self_label(p))
        }
        IdentityRule::PlaceholderOnly => {
            !title.is_empty() && participants.len() == 1 && has_placeholder
        }
        IdentityRule::TitleMatch => {
            !title.is_empty()
                && participants.len() == 2
                && !has_placeholder
                && title_match(participants, title).is_some()
        }
        IdentityRule::NamedCounterpart => participants.len() == 2,
    }
}

/// Returns `(counterpart, other)` when exactly one participant matches the title.
fn title_match<'a>(participants: &'a [String], title: &str) -> Option<(&'a str, &'a str)> {
    let [a, b] = participants else {
        return None;
    };
    match (a.to_lowercase() == title.to_lowercase(), b.to_lowercase() == title.to_lowercase()) {
        (true, false) => Some((a.as_str(), b.as_str())),
        (false, true) => Some((b.as_str(), a.as_str())),
        _ => None,
    }
}

fn apply(
    rule: IdentityRule,
    messages: Vec<Message>,
    participants: &[String],
    title: &str,
    config: &IdentityConfig,
) -> (Vec<Message>, Vec<String>) {
    match rule {
        IdentityRule::PlaceholderAndSelf | IdentityRule::PlaceholderOnly => {
            let messages = rebuild(messages, |msg| {
                if config.is_placeholder(&msg.sender) {
                    msg.sender = title.to_string();
                    msg.is_self = false;
                } else if config.is_self_label(&msg.sender) {
                    msg.is_self = true;
                }
            });
            let participants = if rule == IdentityRule::PlaceholderOnly {
                vec![title.to_string()]
            } else {
                participants
                    .iter()
                    .map(|p| {
                        if config.is_placeholder(p) {
                            title.to_string()
                        } else {
                            p.clone()
                        }
                    })
                    .collect()
            };
            (messages, participants)
        }
        IdentityRule::TitleMatch => {
            let Some((counterpart, other)) = title_match(participants, title) else {
                return (messages, participants.to_vec());
            };
            let messages = rebuild(messages, |msg| {
                if msg.sender == counterpart {
                    msg.is_self = false;
                } else if msg.sender == other {
                    msg.sender.clone_from(&config.self_label);
                    msg.is_self = true;
                }
            });
            (messages, vec![counterpart.to_string(), config.self_label.clone()])
        }
        IdentityRule::NamedCounterpart => {
            let messages = rebuild(messages, |msg| {
                msg.is_self =
                    config.is_self_label(&msg.sender) || config.is_placeholder(&msg.sender);
            });
            (messages, participants.to_vec())
        }
    }
}

/// Rebuilds the sequence, applying `edit` to every non-system message.
fn rebuild(messages: Vec<Message>, mut edit: impl FnMut(&mut Message)) -> Vec<Message> {
    messages
        .into_iter()
        .map(|mut msg| {
            if msg.kind != MessageType::System {
                edit(&mut msg);
            }
            msg
        })
        .collect()
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
