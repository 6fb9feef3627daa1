//! Wire types shared by the auth and table clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GoTrue user as returned inside a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user id (a UUID on hosted projects)
    pub id: String,
    /// Email address, when the user signed up with one
    #[serde(default)]
    pub email: Option<String>,
    /// Audience claim
    #[serde(default)]
    pub aud: Option<String>,
    /// Postgres role used for row-level security
    #[serde(default)]
    pub role: Option<String>,
    /// Account creation time
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A signed-in session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// JWT sent as bearer token to PostgREST
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
    /// Always `bearer`
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    /// Unix timestamp when the access token expires
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// The user this session belongs to
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill in `expires_at` from `expires_in` when the server left it out
    #[must_use]
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = Some(now.timestamp() + self.expires_in);
        }
        self
    }

    /// Whether the access token is expired (or about to, within `margin_secs`)
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, margin_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - margin_secs <= now.timestamp())
    }
}

/// Auth state transitions announced to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    /// A persisted session was restored
    InitialSession,
    /// A user signed in
    SignedIn,
    /// The session ended
    SignedOut,
    /// The access token was refreshed
    TokenRefreshed,
    /// User attributes changed
    UserUpdated,
}

impl std::fmt::Display for AuthChangeEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
        };
        f.write_str(name)
    }
}
