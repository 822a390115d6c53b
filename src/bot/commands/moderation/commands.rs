use std::sync::Arc;

use crate::bot::commands::{commands::{CommandT, FnCommand}, moderation::{executor::{ModAction, ModerationRun}, parse_target_list, parse_timeout_args, DEFAULT_REASON}};

pub fn timeout_command() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |invocation, state| {
            Box::pin(async move {
                let parsed = parse_timeout_args(&invocation.args);
                let action = ModAction::Timeout { duration: parsed.duration, reason: parsed.reason };
                ModerationRun::new(&state, &invocation.event.channel).execute(parsed.targets, action).await?;
                Ok(())
            })
        },
        "Times out one or more users",
        "!ppTimeout @user [user ...] | [duration] | [reason]",
        "timeout",
    ))
}

pub fn untimeout_command() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |invocation, state| {
            Box::pin(async move {
                let targets = parse_target_list(&invocation.args);
                ModerationRun::new(&state, &invocation.event.channel).execute(targets, ModAction::Untimeout).await?;
                Ok(())
            })
        },
        "Lifts the timeout on one or more users",
        "!ppUntimeout @user [user ...]",
        "untimeout",
    ))
}

pub fn ban_command() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |invocation, state| {
            Box::pin(async move {
                let targets = parse_target_list(&invocation.args);
                let action = ModAction::Ban { reason: DEFAULT_REASON.to_string() };
                ModerationRun::new(&state, &invocation.event.channel).execute(targets, action).await?;
                Ok(())
            })
        },
        "Bans one or more users through Helix",
        "!ppBan @user [user ...]",
        "ban",
    ))
}

pub fn unban_command() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |invocation, state| {
            Box::pin(async move {
                let targets = parse_target_list(&invocation.args);
                ModerationRun::new(&state, &invocation.event.channel).execute(targets, ModAction::Unban).await?;
                Ok(())
            })
        },
        "Unbans one or more users through Helix",
        "!ppUnban @user [user ...]",
        "unban",
    ))
}
