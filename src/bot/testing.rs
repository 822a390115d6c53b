//! In-memory chat transport and Helix fakes for unit tests.

use std::{collections::HashSet, sync::{atomic::{AtomicBool, Ordering}, Arc, Mutex}};

use futures::future::BoxFuture;

use crate::{api::twitch_api::{HelixUser, ModerationApi}, bot::{commands::commands::BotResult, platforms::twitch::twitch::ChatClient, state::def::{AppState, BotConfig, BotError, SessionIdentity}}};

#[derive(Clone, Default)]
pub struct FakeChat {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail_next: Arc<AtomicBool>,
}

impl FakeChat {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next send is recorded as attempted but returns an error.
    pub fn fail_next_send(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, m)| m).collect()
    }
}

impl ChatClient for FakeChat {
    fn send_message<'a>(&'a self, channel: &'a str, message: &'a str) -> BoxFuture<'a, BotResult<()>> {
        self.sent.lock().unwrap().push((channel.to_string(), message.to_string()));
        let result = if self.fail_next.swap(false, Ordering::SeqCst) {
            Err(BotError::Connect("send dropped".to_string()))
        } else {
            Ok(())
        };
        Box::pin(async move { result })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetUsers(Vec<String>),
    Ban { user_id: String, reason: String },
    Unban { user_id: String },
}

#[derive(Clone, Default)]
pub struct FakeApi {
    users: Vec<HelixUser>,
    calls: Arc<Mutex<Vec<ApiCall>>>,
    failing_ids: Arc<Mutex<HashSet<String>>>,
    lookup_fails: Arc<AtomicBool>,
}

impl FakeApi {
    pub fn with_users(users: &[(&str, &str)]) -> Self {
        FakeApi {
            users: users.iter().map(|(login, id)| HelixUser { id: id.to_string(), login: login.to_string() }).collect(),
            ..Default::default()
        }
    }

    pub fn fail_for(&self, user_id: &str) {
        self.failing_ids.lock().unwrap().insert(user_id.to_string());
    }

    pub fn fail_lookup(&self) {
        self.lookup_fails.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(&self, user_id: &str) -> BotResult<()> {
        if self.failing_ids.lock().unwrap().contains(user_id) {
            return Err(BotError::Api { status: 500, body: "boom".to_string() });
        }
        Ok(())
    }
}

impl ModerationApi for FakeApi {
    fn get_users<'a>(&'a self, _access_token: &'a str, logins: &'a [String]) -> BoxFuture<'a, BotResult<Vec<HelixUser>>> {
        self.record(ApiCall::GetUsers(logins.to_vec()));
        let result = if self.lookup_fails.load(Ordering::SeqCst) {
            Err(BotError::Api { status: 503, body: "unavailable".to_string() })
        } else {
            Ok(self.users.iter().filter(|u| logins.contains(&u.login)).cloned().collect())
        };
        Box::pin(async move { result })
    }

    fn ban_user<'a>(&'a self, _session: &'a SessionIdentity, user_id: &'a str, reason: &'a str) -> BoxFuture<'a, BotResult<()>> {
        self.record(ApiCall::Ban { user_id: user_id.to_string(), reason: reason.to_string() });
        let result = self.outcome(user_id);
        Box::pin(async move { result })
    }

    fn unban_user<'a>(&'a self, _session: &'a SessionIdentity, user_id: &'a str) -> BoxFuture<'a, BotResult<()>> {
        self.record(ApiCall::Unban { user_id: user_id.to_string() });
        let result = self.outcome(user_id);
        Box::pin(async move { result })
    }
}

pub fn test_config() -> BotConfig {
    BotConfig {
        channel: "somechannel".to_string(),
        bot_login: "ppbot".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        authorization_code: "code".to_string(),
        token_endpoint: "http://localhost/oauth2/token".to_string(),
        helix_url: "http://localhost/helix".to_string(),
        operator: "ppsnz".to_string(),
        greeter: "soly_er".to_string(),
        reconnect: true,
        log_level: "debug".to_string(),
    }
}

pub fn test_session() -> SessionIdentity {
    SessionIdentity {
        broadcaster_id: "broadcaster-id".to_string(),
        moderator_id: "mod-id".to_string(),
        access_token: "token".to_string(),
    }
}

pub fn test_state(chat: FakeChat, api: FakeApi) -> AppState {
    AppState::new(test_session(), Arc::new(test_config()), Arc::new(chat), Arc::new(api))
}
