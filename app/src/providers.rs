//! Collaborator interfaces.
//!
//! The reducer only talks to the outside world through these traits. The
//! Supabase-backed implementations live in [`crate::adapters`]; in-memory
//! ones for tests live in [`crate::mocks`].

use crate::error::Result;
use crate::types::{NewTodo, Todo, TodoId, UserId};
use futures::stream::BoxStream;
use std::future::Future;

/// A signed-in session as the client sees it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Owner of the session
    pub user_id: UserId,
    /// Email, when known
    pub email: Option<String>,
}

impl Session {
    /// Session for `user_id` with no email
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: UserId::new(user_id),
            email: None,
        }
    }
}

/// Kinds of auth state change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthEvent {
    /// Existing session picked up at startup
    InitialSession,
    /// User signed in
    SignedIn,
    /// Session ended
    SignedOut,
    /// Access token renewed
    TokenRefreshed,
    /// User attributes changed
    UserUpdated,
}

impl std::fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InitialSession => "initial_session",
            Self::SignedIn => "signed_in",
            Self::SignedOut => "signed_out",
            Self::TokenRefreshed => "token_refreshed",
            Self::UserUpdated => "user_updated",
        };
        f.write_str(name)
    }
}

/// Stream of auth changes; dropping it unsubscribes
pub type AuthChanges = BoxStream<'static, (AuthEvent, Option<Session>)>;

/// Remote `todos` table.
///
/// # Implementation Notes
///
/// - `list` must return rows newest first
/// - Writes do not return the written row; callers reload instead
pub trait TodoRepository: Send + Sync {
    /// All rows owned by `user_id`, ordered by creation time descending
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or rows do not decode.
    fn list(&self, user_id: &UserId) -> impl Future<Output = Result<Vec<Todo>>> + Send;

    /// Insert one row
    ///
    /// # Errors
    ///
    /// Returns error if the store rejects the row.
    fn insert(&self, todo: &NewTodo) -> impl Future<Output = Result<()>> + Send;

    /// Set the completion flag of row `id`
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn set_completed(&self, id: TodoId, completed: bool) -> impl Future<Output = Result<()>> + Send;

    /// Delete row `id`
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn delete(&self, id: TodoId) -> impl Future<Output = Result<()>> + Send;
}

/// External auth provider.
pub trait AuthProvider: Send + Sync {
    /// Current session, if any
    ///
    /// # Errors
    ///
    /// Returns error if an expired session could not be refreshed.
    fn get_session(&self) -> impl Future<Output = Result<Option<Session>>> + Send;

    /// Sign in with email and password
    ///
    /// The new session is also announced on [`AuthProvider::subscribe`].
    ///
    /// # Errors
    ///
    /// Returns error if the credentials are rejected.
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send;

    /// End the current session
    ///
    /// # Errors
    ///
    /// Returns error if the provider could not be reached.
    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send;

    /// Changes from now on
    fn subscribe(&self) -> AuthChanges;
}
