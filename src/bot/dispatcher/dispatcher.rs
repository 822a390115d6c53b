use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error};

use crate::bot::{chat_event::chat_event::ChatEvent, commands::{commands::Invocation, CommandSpec}, cooldown::CooldownGate, state::def::AppState};

/// Runs every matching command for a message. Owned by the event loop, which
/// feeds it one message at a time.
pub struct Dispatcher {
    specs: Vec<CommandSpec>,
    cooldown: CooldownGate,
    state: Arc<AppState>,
}

impl Dispatcher {
    pub fn new(specs: Vec<CommandSpec>, state: Arc<AppState>) -> Self {
        Dispatcher { specs, cooldown: CooldownGate::default(), state }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    pub async fn dispatch_message(&mut self, event: &ChatEvent) -> usize {
        self.dispatch_at(event, Utc::now().timestamp_millis()).await
    }

    /// Returns how many commands fired. Matches are independent, so more than
    /// one command may fire for the same message.
    pub async fn dispatch_at(&mut self, event: &ChatEvent, now_ms: i64) -> usize {
        let on_cooldown = self.cooldown.is_on_cooldown(now_ms);
        let mut fired = 0;

        for spec in &self.specs {
            let Some(args) = spec.match_trigger(&event.message) else { continue };
            if !spec.is_authorized(event) {
                continue;
            }
            if spec.rate_limited {
                if on_cooldown {
                    debug!("{} on cooldown, ignoring {}", spec.command.name(), event.sender);
                    continue;
                }
                self.cooldown.mark_fired(now_ms);
            }

            debug!("Running {} for {} in {}", spec.command.name(), event.sender, event.channel);
            let invocation = Invocation { event: event.clone(), args };
            if let Err(e) = spec.command.execute(invocation, self.state.clone()).await {
                error!("Command {} failed: {e}", spec.command.name());
            }
            fired += 1;
        }

        fired
    }
}
