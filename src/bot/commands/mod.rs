use std::sync::Arc;

use crate::bot::{chat_event::chat_event::ChatEvent, commands::commands::CommandT};

pub mod commands;
pub mod greeting;
pub mod moderation;
pub mod notes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Whole message equals the trigger.
    Exact,
    /// Message starts with the trigger.
    Prefix,
    /// Trigger appears anywhere in the message, case-insensitive.
    Mention,
}

#[derive(Clone)]
pub struct CommandSpec {
    pub trigger: String,
    pub mode: TriggerMode,
    pub requires_sender: String,
    /// Subject to the shared cooldown gate.
    pub rate_limited: bool,
    pub command: Arc<dyn CommandT>,
}

impl CommandSpec {
    /// Returns the argument text left after the trigger when the message matches.
    pub fn match_trigger(&self, message: &str) -> Option<String> {
        match self.mode {
            TriggerMode::Exact => (message == self.trigger).then(String::new),
            TriggerMode::Prefix => message.strip_prefix(self.trigger.as_str()).map(str::to_string),
            TriggerMode::Mention => message
                .to_lowercase()
                .contains(&self.trigger.to_lowercase())
                .then(|| message.to_string()),
        }
    }

    pub fn is_authorized(&self, event: &ChatEvent) -> bool {
        event.sender == self.requires_sender
    }
}
