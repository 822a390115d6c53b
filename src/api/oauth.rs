use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::bot::state::def::BotConfig;

pub const REDIRECT_URI: &str = "http://localhost";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Twitch token request failed ({status}): {body}")]
    Response { status: u16, body: String },
    #[error("No response from Twitch token endpoint: {0}")]
    NoResponse(#[source] reqwest::Error),
    #[error("Malformed Twitch token request: {0}")]
    MalformedRequest(#[source] reqwest::Error),
    #[error("Invalid Twitch token response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenDetails {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Vec<String>,
    pub token_type: String,
}

impl TokenDetails {
    /// Checks the fields the rest of the bot depends on.
    pub fn parse(body: &str) -> Result<Self, TokenError> {
        let token: TokenDetails = serde_json::from_str(body).map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        if token.access_token.trim().is_empty() {
            return Err(TokenError::InvalidResponse("empty access_token".to_string()));
        }
        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(TokenError::InvalidResponse(format!("unexpected token_type '{}'", token.token_type)));
        }
        if token.expires_in <= 0 {
            return Err(TokenError::InvalidResponse(format!("non-positive expires_in {}", token.expires_in)));
        }

        Ok(token)
    }

    pub fn expires_at(&self, issued_at: DateTime<Utc>) -> DateTime<Utc> {
        issued_at + Duration::seconds(self.expires_in)
    }
}

/// Authorization code grant. Any failure here is fatal to startup.
pub async fn fetch_access_token(http: &reqwest::Client, config: &BotConfig) -> Result<TokenDetails, TokenError> {
    info!("Fetching Twitch OAuth token");

    let params = [
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("code", config.authorization_code.as_str()),
        ("grant_type", "authorization_code"),
        ("redirect_uri", REDIRECT_URI),
    ];

    let request = http
        .post(&config.token_endpoint)
        .query(&params)
        .build()
        .map_err(TokenError::MalformedRequest)?;

    let response = http.execute(request).await.map_err(|e| {
        error!("Failed to get Twitch OAuth token: {e}");
        if e.is_builder() { TokenError::MalformedRequest(e) } else { TokenError::NoResponse(e) }
    })?;

    let status = response.status();
    let body = response.text().await.map_err(TokenError::NoResponse)?;
    if !status.is_success() {
        error!("Twitch token endpoint answered {status}");
        return Err(TokenError::Response { status: status.as_u16(), body });
    }

    let token = TokenDetails::parse(&body)?;
    info!("Got Twitch OAuth token, expires at {}", token.expires_at(Utc::now()));
    Ok(token)
}
