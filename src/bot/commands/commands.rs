use std::sync::Arc;

use futures::future::BoxFuture;

use crate::bot::{chat_event::chat_event::ChatEvent, commands::{greeting::greeting_command, moderation::commands::{ban_command, timeout_command, unban_command, untimeout_command}, notes::commands::{check_command, note_command, set_note_command}, CommandSpec, TriggerMode}, state::def::{AppState, BotConfig, BotError}};

pub type BotResult<T> = Result<T, BotError>;

pub const CHECK: &str = "!ppCheck";
pub const NOTE: &str = "!ppNote";
pub const SET_NOTE: &str = "!ppSetNote";
pub const TIMEOUT: &str = "!ppTimeout";
pub const UNTIMEOUT: &str = "!ppUntimeout";
pub const BAN: &str = "!ppBan";
pub const UNBAN: &str = "!ppUnban";
pub const GREETING_MENTION: &str = "@ppsnz";

/// A matched message plus whatever followed the trigger.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub event: ChatEvent,
    pub args: String,
}

pub trait CommandT: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn usage(&self) -> &str;

    fn execute(&self, invocation: Invocation, state: Arc<AppState>) -> BoxFuture<'static, BotResult<()>>;
}

pub struct FnCommand<F> {func: F, desc: String, usage: String, name: String} impl<F> FnCommand<F>
    where
        F: Fn(Invocation, Arc<AppState>) -> BoxFuture<'static, BotResult<()>> + Send + Sync + 'static {
    pub fn new(func: F, desc: impl Into<String>, usage: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            func,
            desc: desc.into(),
            usage: usage.into(),
            name: name.into(),
        }
    }
}

impl<F> CommandT for FnCommand<F> where
    F: Fn(Invocation, Arc<AppState>) -> BoxFuture<'static, BotResult<()>> + Send + Sync + 'static {
        fn execute(&self, invocation: Invocation, state: Arc<AppState>) -> BoxFuture<'static, BotResult<()>> {
            (self.func)(invocation, state)
        }

        fn name(&self) -> &str { &self.name }
        fn description(&self) -> &str { &self.desc }
        fn usage(&self) -> &str { &self.usage }
}

#[macro_export]
macro_rules! cmd {
    ($command:expr, $mode:expr, $trigger:expr, $sender:expr) => {
        CommandSpec {
            trigger: $trigger.to_string(),
            mode: $mode,
            requires_sender: $sender.to_string(),
            rate_limited: false,
            command: $command,
        }
    };
    ($command:expr, $mode:expr, $trigger:expr, $sender:expr, rate_limited) => {
        CommandSpec {
            rate_limited: true,
            ..$crate::cmd!($command, $mode, $trigger, $sender)
        }
    };
}

/// The full command table, in evaluation order.
pub fn build_command_specs(config: &BotConfig) -> Vec<CommandSpec> {
    let operator = config.operator.as_str();

    vec![
        cmd!(check_command(), TriggerMode::Exact, CHECK, operator),
        cmd!(note_command(), TriggerMode::Exact, NOTE, operator),
        cmd!(set_note_command(), TriggerMode::Prefix, SET_NOTE, operator),
        cmd!(greeting_command(), TriggerMode::Mention, GREETING_MENTION, config.greeter, rate_limited),
        cmd!(timeout_command(), TriggerMode::Prefix, TIMEOUT, operator),
        cmd!(untimeout_command(), TriggerMode::Prefix, UNTIMEOUT, operator),
        cmd!(ban_command(), TriggerMode::Prefix, BAN, operator),
        cmd!(unban_command(), TriggerMode::Prefix, UNBAN, operator),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::testing::test_config;

    fn spec<'a>(specs: &'a [CommandSpec], trigger: &str) -> &'a CommandSpec {
        specs.iter().find(|s| s.trigger == trigger).unwrap()
    }

    #[test]
    fn table_order_is_fixed() {
        let specs = build_command_specs(&test_config());
        let triggers: Vec<&str> = specs.iter().map(|s| s.trigger.as_str()).collect();
        assert_eq!(triggers, vec![CHECK, NOTE, SET_NOTE, GREETING_MENTION, TIMEOUT, UNTIMEOUT, BAN, UNBAN]);
    }

    #[test]
    fn only_greeting_is_rate_limited() {
        let specs = build_command_specs(&test_config());
        for s in &specs {
            assert_eq!(s.rate_limited, s.trigger == GREETING_MENTION, "{}", s.trigger);
        }
        assert_eq!(spec(&specs, GREETING_MENTION).requires_sender, "soly_er");
        assert_eq!(spec(&specs, BAN).requires_sender, "ppsnz");
    }

    #[test]
    fn exact_triggers_need_the_whole_message() {
        let specs = build_command_specs(&test_config());
        let check = spec(&specs, CHECK);

        assert_eq!(check.match_trigger("!ppCheck"), Some(String::new()));
        assert_eq!(check.match_trigger("!ppCheck "), None);
        assert_eq!(check.match_trigger("!ppcheck"), None);
    }

    #[test]
    fn prefix_triggers_hand_back_the_rest() {
        let specs = build_command_specs(&test_config());
        let timeout = spec(&specs, TIMEOUT);

        assert_eq!(timeout.match_trigger("!ppTimeout @foo | 5m").as_deref(), Some(" @foo | 5m"));
        assert_eq!(timeout.match_trigger("hey !ppTimeout foo"), None);
        // "!ppUntimeout" does not start with "!ppTimeout"
        assert_eq!(timeout.match_trigger("!ppUntimeout foo"), None);
    }

    #[test]
    fn mention_is_case_insensitive_substring() {
        let specs = build_command_specs(&test_config());
        let greet = spec(&specs, GREETING_MENTION);

        assert!(greet.match_trigger("hi @PPSNZ how are you").is_some());
        assert!(greet.match_trigger("hi ppsnz").is_none());
    }
}
