use std::sync::Arc;

use thiserror::Error;
use tmi::client::{read::RecvError, write::SendError, ReconnectError};
use tokio::sync::RwLock;

use crate::{api::{oauth::TokenError, twitch_api::ModerationApi}, bot::{commands::notes::NoteStore, platforms::twitch::twitch::ChatClient}};

pub struct AppState {
    pub session: SessionIdentity,
    pub config: Arc<BotConfig>,
    pub notes: RwLock<NoteStore>,
    pub chat_client: Arc<dyn ChatClient>,
    pub api: Arc<dyn ModerationApi>,
}

/// Ids and token resolved once at launch. Never refreshed. Every Helix call
/// authenticates with `access_token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub broadcaster_id: String,
    pub moderator_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub channel: String,
    pub bot_login: String,
    pub client_id: String,
    pub client_secret: String,
    pub authorization_code: String,
    pub token_endpoint: String,
    pub helix_url: String,
    /// The one login allowed to run commands. Also the moderator account for Helix calls.
    pub operator: String,
    pub greeter: String,
    pub reconnect: bool,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Helix returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Unexpected Helix response shape: {0}")]
    Decode(String),
    #[error("Twitch user not found: {0}")]
    UserNotFound(String),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Chat connect error: {0}")]
    Connect(String),
    #[error("Chat receive error: {0}")]
    RecvError(#[from] RecvError),
    #[error("Chat send error: {0}")]
    SendError(#[from] SendError),
    #[error("Chat reconnect error: {0}")]
    ReconnectError(#[from] ReconnectError),
    #[error("Gave up reconnecting after {0} attempts")]
    ReconnectExhausted(u32),
}
