//! GoTrue auth client
//!
//! Holds the current session in memory and announces every change on a
//! broadcast channel, so UI state can follow sign-in, sign-out and token
//! refresh without polling.

use crate::error::{Result, SupabaseError};
use crate::types::{AuthChangeEvent, Session};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock, broadcast};

/// Refresh the access token when it expires within this many seconds
const EXPIRY_MARGIN_SECS: i64 = 30;

/// Capacity of the auth change channel
const AUTH_EVENT_CAPACITY: usize = 16;

/// An auth state change as delivered to subscribers
pub type AuthChange = (AuthChangeEvent, Option<Session>);

/// Auth client for a Supabase project
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    auth_url: String,
    anon_key: String,
    session: Arc<RwLock<Option<Session>>>,
    refreshing: Arc<Mutex<()>>,
    events: broadcast::Sender<AuthChange>,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

impl AuthClient {
    /// Create an auth client for `{project_url}/auth/v1`
    #[must_use]
    pub fn new(http: Client, project_url: &str, anon_key: String) -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            http,
            auth_url: format!("{}/auth/v1", project_url.trim_end_matches('/')),
            anon_key,
            session: Arc::new(RwLock::new(None)),
            refreshing: Arc::new(Mutex::new(())),
            events,
        }
    }

    /// Subscribe to auth state changes
    ///
    /// The subscription only sees changes that happen after this call; pair it
    /// with [`AuthClient::get_session`] to learn the current state.
    #[must_use]
    pub fn on_auth_state_change(&self) -> AuthSubscription {
        AuthSubscription {
            receiver: self.events.subscribe(),
        }
    }

    /// Current session, refreshed first if the access token has expired
    ///
    /// Concurrent callers share one refresh; the ones that waited see the
    /// session it produced.
    ///
    /// # Errors
    ///
    /// Returns an error if a needed refresh fails. The stale session is
    /// dropped in that case and `SignedOut` is announced.
    pub async fn get_session(&self) -> Result<Option<Session>> {
        match self.current().await {
            Some(session) if Self::needs_refresh(&session) => {},
            other => return Ok(other),
        }

        let _refreshing = self.refreshing.lock().await;
        let Some(session) = self.current().await else {
            return Ok(None);
        };
        if !Self::needs_refresh(&session) {
            return Ok(Some(session));
        }

        tracing::debug!(user_id = %session.user.id, "Access token expired, refreshing");
        match self.refresh_with(&session.refresh_token).await {
            Ok(refreshed) => Ok(Some(refreshed)),
            Err(error) => {
                tracing::warn!(%error, "Token refresh failed, signing out locally");
                self.replace(AuthChangeEvent::SignedOut, None).await;
                Err(error)
            },
        }
    }

    /// Bearer token for data requests, if signed in
    ///
    /// Goes through [`AuthClient::get_session`], so an expired token is
    /// refreshed before it is handed out.
    ///
    /// # Errors
    ///
    /// Returns the refresh error when the token had expired and could not be
    /// renewed.
    pub async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.get_session().await?.map(|session| session.access_token))
    }

    /// Restore a session obtained elsewhere (for example persisted to disk)
    ///
    /// Announces `InitialSession`.
    pub async fn set_session(&self, session: Session) {
        let session = session.stamped(Utc::now());
        self.replace(AuthChangeEvent::InitialSession, Some(session)).await;
    }

    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::ApiError`] with GoTrue's reason (for example
    /// "Invalid login credentials") or a transport error.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let response = self
            .post("token?grant_type=password", None)
            .json(&PasswordCredentials { email, password })
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        let session = Self::session_from(response).await?;
        tracing::info!(user_id = %session.user.id, "Signed in");
        self.replace(AuthChangeEvent::SignedIn, Some(session.clone())).await;
        Ok(session)
    }

    /// Create an account with email and password
    ///
    /// Returns `None` when the project requires email confirmation before
    /// the first sign-in.
    ///
    /// # Errors
    ///
    /// Returns an error if GoTrue rejects the sign-up or the request fails.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>> {
        let response = self
            .post("signup", None)
            .json(&PasswordCredentials { email, password })
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SupabaseError::ResponseParseFailed(e.to_string()))?;

        if body.get("access_token").is_none() {
            tracing::info!("Sign-up accepted, confirmation pending");
            return Ok(None);
        }

        let session = serde_json::from_value::<Session>(body)
            .map_err(|e| SupabaseError::ResponseParseFailed(e.to_string()))?
            .stamped(Utc::now());
        self.replace(AuthChangeEvent::SignedIn, Some(session.clone())).await;
        Ok(Some(session))
    }

    /// Exchange the refresh token for a new session
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseError::NotAuthenticated`] without a session, or the
    /// GoTrue error if the refresh token was rejected.
    pub async fn refresh_session(&self) -> Result<Session> {
        let _refreshing = self.refreshing.lock().await;
        let refresh_token = self
            .current()
            .await
            .map(|session| session.refresh_token)
            .ok_or(SupabaseError::NotAuthenticated)?;

        self.refresh_with(&refresh_token).await
    }

    /// End the session
    ///
    /// A token the server no longer knows counts as signed out. Local state is
    /// cleared and `SignedOut` announced whenever the call succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout request fails for another reason; the
    /// local session is kept in that case.
    pub async fn sign_out(&self) -> Result<()> {
        let Some(token) = self.current().await.map(|session| session.access_token) else {
            self.replace(AuthChangeEvent::SignedOut, None).await;
            return Ok(());
        };

        let response = self
            .post("logout", Some(&token))
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let gone = matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        );
        if !status.is_success() && !gone {
            return Err(SupabaseError::from_response(response).await);
        }

        tracing::info!("Signed out");
        self.replace(AuthChangeEvent::SignedOut, None).await;
        Ok(())
    }

    async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    fn needs_refresh(session: &Session) -> bool {
        session.is_expired(Utc::now(), EXPIRY_MARGIN_SECS)
    }

    async fn refresh_with(&self, refresh_token: &str) -> Result<Session> {
        let response = self
            .post("token?grant_type=refresh_token", None)
            .json(&RefreshGrant { refresh_token })
            .send()
            .await
            .map_err(|e| SupabaseError::RequestFailed(e.to_string()))?;

        let session = Self::session_from(response).await?;
        self.replace(AuthChangeEvent::TokenRefreshed, Some(session.clone())).await;
        Ok(session)
    }

    fn post(&self, path: &str, bearer: Option<&str>) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/{path}", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key))
    }

    async fn session_from(response: reqwest::Response) -> Result<Session> {
        if !response.status().is_success() {
            return Err(SupabaseError::from_response(response).await);
        }

        response
            .json::<Session>()
            .await
            .map(|session| session.stamped(Utc::now()))
            .map_err(|e| SupabaseError::ResponseParseFailed(e.to_string()))
    }

    async fn replace(&self, event: AuthChangeEvent, session: Option<Session>) {
        *self.session.write().await = session.clone();
        tracing::debug!(%event, "Auth state changed");
        // No subscribers is fine.
        let _ = self.events.send((event, session));
    }
}

/// Receiver side of [`AuthClient::on_auth_state_change`]
///
/// Dropping it (or calling [`AuthSubscription::unsubscribe`]) stops delivery.
pub struct AuthSubscription {
    receiver: broadcast::Receiver<AuthChange>,
}

impl AuthSubscription {
    /// Wait for the next change
    ///
    /// Returns `None` once the client is gone. Changes missed because the
    /// subscriber lagged are skipped; only the latest state matters.
    pub async fn recv(&mut self) -> Option<AuthChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Auth subscriber lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Stop receiving changes
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("auth_url", &self.auth_url)
            .finish_non_exhaustive()
    }
}
