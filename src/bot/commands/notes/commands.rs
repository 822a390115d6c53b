use std::sync::Arc;

use tracing::info;

use crate::bot::{commands::commands::{CommandT, FnCommand}, replies::Replies};

pub fn check_command() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |invocation, state| {
            Box::pin(async move {
                state.chat_client.send_message(&invocation.event.channel, &Replies::check(&state.session)).await?;
                Ok(())
            })
        },
        "Shows the resolved moderator and broadcaster ids",
        "!ppCheck",
        "check",
    ))
}

pub fn note_command() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |invocation, state| {
            Box::pin(async move {
                let note = state.notes.read().await.get_note().to_string();
                state.chat_client.send_message(&invocation.event.channel, &note).await?;
                Ok(())
            })
        },
        "Sends the current note",
        "!ppNote",
        "note",
    ))
}

pub fn set_note_command() -> Arc<dyn CommandT> {
    Arc::new(FnCommand::new(
        |invocation, state| {
            Box::pin(async move {
                let note = invocation.args.trim().to_string();
                info!("Note set by {}: {}", invocation.event.sender, note);
                state.notes.write().await.set_note(note);

                state.chat_client.send_message(&invocation.event.channel, &Replies::note_saved()).await?;
                Ok(())
            })
        },
        "Replaces the current note",
        "!ppSetNote <text>",
        "set_note",
    ))
}
