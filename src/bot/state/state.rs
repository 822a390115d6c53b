use std::sync::Arc;

use dotenvy::dotenv;
use tokio::sync::RwLock;

use crate::{api::twitch_api::ModerationApi, bot::{commands::notes::NoteStore, platforms::twitch::twitch::ChatClient, state::def::{AppState, BotConfig, ConfigError, SessionIdentity}}};

const DEFAULT_TOKEN_ENDPOINT: &str = "https://id.twitch.tv/oauth2/token";
const DEFAULT_HELIX_URL: &str = "https://api.twitch.tv/helix";
const DEFAULT_OPERATOR: &str = "ppsnz";
const DEFAULT_GREETER: &str = "soly_er";

impl BotConfig {
    /// Reads the config from the process environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError> where F: Fn(&str) -> Option<String> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let reconnect = match lookup("BOT_RECONNECT") {
            Some(v) => v.trim().parse::<bool>().map_err(|_| ConfigError::Invalid("BOT_RECONNECT", v))?,
            None => true,
        };

        Ok(BotConfig {
            channel: required("TWITCH_CHANNEL")?.trim_start_matches('#').to_ascii_lowercase(),
            bot_login: required("TWITCH_USER")?,
            client_id: required("TWITCH_CLIENT_ID")?,
            client_secret: required("TWITCH_CLIENT_SECRET")?,
            authorization_code: required("TWITCH_AUTHORIZATION_CODE")?,
            token_endpoint: optional("TWITCH_TOKEN_ENDPOINT", DEFAULT_TOKEN_ENDPOINT),
            helix_url: optional("TWITCH_HELIX_URL", DEFAULT_HELIX_URL).trim_end_matches('/').to_string(),
            operator: optional("BOT_OPERATOR", DEFAULT_OPERATOR).to_ascii_lowercase(),
            greeter: optional("BOT_GREETER", DEFAULT_GREETER).to_ascii_lowercase(),
            reconnect,
            log_level: optional("LOG_LEVEL", "info"),
        })
    }

    /// Channel name the way IRC wants it.
    pub fn irc_channel(&self) -> String {
        format!("#{}", self.channel)
    }
}

impl AppState {
    pub fn new(session: SessionIdentity, config: Arc<BotConfig>, chat_client: Arc<dyn ChatClient>, api: Arc<dyn ModerationApi>) -> Self {
        AppState {
            session,
            config,
            notes: RwLock::new(NoteStore::new()),
            chat_client,
            api,
        }
    }
}
