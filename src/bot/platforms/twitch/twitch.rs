use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tracing::info;

use crate::bot::{chat_event::chat_event::ChatEvent, commands::commands::BotResult, state::def::{BotConfig, BotError}};

/// Outbound side of the chat transport.
pub trait ChatClient: Send + Sync {
    fn send_message<'a>(&'a self, channel: &'a str, message: &'a str) -> BoxFuture<'a, BotResult<()>>;
}

#[derive(Clone)]
pub struct TwitchClient {
    pub client: Arc<Mutex<tmi::Client>>,
}

impl ChatClient for TwitchClient {
    fn send_message<'a>(&'a self, channel: &'a str, message: &'a str) -> BoxFuture<'a, BotResult<()>> {
        Box::pin(async move {
            self.client.lock().await.privmsg(channel, message).send().await?;
            Ok(())
        })
    }
}

impl TwitchClient {
    pub async fn connect(config: &BotConfig, access_token: &str) -> BotResult<Self> {
        let credentials = tmi::Credentials::new(config.bot_login.clone(), format!("oauth:{}", access_token));
        let mut client = tmi::Client::builder()
            .credentials(credentials)
            .connect()
            .await
            .map_err(|e| BotError::Connect(e.to_string()))?;

        client.join(config.irc_channel()).await?;
        info!("Joined Twitch channel {} as {}", config.irc_channel(), config.bot_login);

        Ok(TwitchClient { client: Arc::new(Mutex::new(client)) })
    }
}

pub fn map_privmsg(msg: &tmi::Privmsg<'_>) -> ChatEvent {
    ChatEvent {
        channel: msg.channel().to_string(),
        sender: msg.sender().login().to_ascii_lowercase(),
        message: msg.text().to_string(),
    }
}
