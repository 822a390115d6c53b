use std::sync::Arc;

use crate::bot::{commands::commands::{CommandT, FnCommand}, replies::Replies};

pub fn greeting_command() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |invocation, state| {
            Box::pin(async move {
                state.chat_client.send_message(&invocation.event.channel, &Replies::greeting()).await?;
                Ok(())
            })
        },
        "Greets the configured user when they mention the operator",
        "@ppsnz",
        "greeting",
    ))
}
