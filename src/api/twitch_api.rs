use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bot::{commands::commands::BotResult, state::def::{BotError, SessionIdentity}};

//Users lookup
#[derive(Deserialize, Debug)]
pub struct UsersResponse {
    pub data: Vec<HelixUser>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HelixUser {
    pub id: String,
    pub login: String,
}

//Ban
#[derive(Serialize, Debug)]
struct BanRequest<'a> {
    data: BanData<'a>,
}

#[derive(Serialize, Debug)]
struct BanData<'a> {
    user_id: &'a str,
    reason: &'a str,
}

/// The Helix calls the moderation commands depend on.
pub trait ModerationApi: Send + Sync {
    fn get_users<'a>(&'a self, access_token: &'a str, logins: &'a [String]) -> BoxFuture<'a, BotResult<Vec<HelixUser>>>;
    fn ban_user<'a>(&'a self, session: &'a SessionIdentity, user_id: &'a str, reason: &'a str) -> BoxFuture<'a, BotResult<()>>;
    fn unban_user<'a>(&'a self, session: &'a SessionIdentity, user_id: &'a str) -> BoxFuture<'a, BotResult<()>>;
}

/// Holds no credentials of its own. Calls authenticate with the token they
/// are handed, normally the one in [`SessionIdentity`].
pub struct HelixClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
}

impl HelixClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        HelixClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str, access_token: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(access_token)
            .header("Client-Id", &self.client_id)
    }

    async fn send_checked(builder: reqwest::RequestBuilder) -> BotResult<String> {
        let res = builder.send().await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(BotError::Api { status: status.as_u16(), body });
        }
        Ok(body)
    }

    pub async fn fetch_users(&self, access_token: &str, logins: &[String]) -> BotResult<Vec<HelixUser>> {
        let query: Vec<(&str, &str)> = logins.iter().map(|l| ("login", l.as_str())).collect();
        let body = Self::send_checked(self.request(reqwest::Method::GET, "/users", access_token).query(&query)).await?;

        let parsed: UsersResponse = serde_json::from_str(&body).map_err(|e| BotError::Decode(format!("users: {e}")))?;
        debug!("Looked up {} login(s), {} found", logins.len(), parsed.data.len());
        Ok(parsed.data)
    }

    pub async fn ban(&self, session: &SessionIdentity, user_id: &str, reason: &str) -> BotResult<()> {
        let ban_request = BanRequest { data: BanData { user_id, reason } };
        let builder = self
            .request(reqwest::Method::POST, "/moderation/bans", &session.access_token)
            .query(&[("broadcaster_id", session.broadcaster_id.as_str()), ("moderator_id", session.moderator_id.as_str())])
            .json(&ban_request);

        Self::send_checked(builder).await?;
        info!("Banned user id {}", user_id);
        Ok(())
    }

    pub async fn unban(&self, session: &SessionIdentity, user_id: &str) -> BotResult<()> {
        let builder = self
            .request(reqwest::Method::DELETE, "/moderation/bans", &session.access_token)
            .query(&[
                ("broadcaster_id", session.broadcaster_id.as_str()),
                ("moderator_id", session.moderator_id.as_str()),
                ("user_id", user_id),
            ]);

        Self::send_checked(builder).await?;
        info!("Unbanned user id {}", user_id);
        Ok(())
    }
}

impl ModerationApi for HelixClient {
    fn get_users<'a>(&'a self, access_token: &'a str, logins: &'a [String]) -> BoxFuture<'a, BotResult<Vec<HelixUser>>> {
        Box::pin(self.fetch_users(access_token, logins))
    }

    fn ban_user<'a>(&'a self, session: &'a SessionIdentity, user_id: &'a str, reason: &'a str) -> BoxFuture<'a, BotResult<()>> {
        Box::pin(self.ban(session, user_id, reason))
    }

    fn unban_user<'a>(&'a self, session: &'a SessionIdentity, user_id: &'a str) -> BoxFuture<'a, BotResult<()>> {
        Box::pin(self.unban(session, user_id))
    }
}

/// Resolves the broadcaster and moderator ids in one lookup.
pub async fn resolve_session(api: &dyn ModerationApi, channel: &str, moderator: &str, access_token: &str) -> BotResult<SessionIdentity> {
    let logins = vec![channel.to_ascii_lowercase(), moderator.to_ascii_lowercase()];
    let users = api.get_users(access_token, &logins).await?;

    let find = |login: &str| {
        users
            .iter()
            .find(|u| u.login.eq_ignore_ascii_case(login))
            .map(|u| u.id.clone())
            .ok_or_else(|| BotError::UserNotFound(login.to_string()))
    };

    let session = SessionIdentity {
        broadcaster_id: find(&logins[0])?,
        moderator_id: find(&logins[1])?,
        access_token: access_token.to_string(),
    };
    info!("Session ready: broadcaster {} moderator {}", session.broadcaster_id, session.moderator_id);
    Ok(session)
}
