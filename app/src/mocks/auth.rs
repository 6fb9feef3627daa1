//! Mock auth provider.

use crate::error::{Result, TodoError};
use crate::providers::{AuthChanges, AuthEvent, AuthProvider, Session};
use futures::StreamExt;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;

#[derive(Debug, Default)]
struct AuthInner {
    session: Option<Session>,
    accounts: HashMap<String, (String, Session)>,
    get_session_failure: Option<TodoError>,
}

/// Mock auth provider.
///
/// Keeps one session in memory and announces changes on a broadcast channel
/// the way the hosted provider does. Tests can also push changes directly
/// with [`MockAuthProvider::emit`].
#[derive(Debug, Clone)]
pub struct MockAuthProvider {
    inner: Arc<Mutex<AuthInner>>,
    events: broadcast::Sender<(AuthEvent, Option<Session>)>,
}

impl MockAuthProvider {
    /// Create a provider with no session and no accounts
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Mutex::new(AuthInner::default())),
            events,
        }
    }

    /// Register credentials that `sign_in_with_password` accepts
    pub fn add_account(&self, email: &str, password: &str, user_id: &str) {
        let session = Session {
            user_id: user_id.into(),
            email: Some(email.to_string()),
        };
        lock(&self.inner)
            .accounts
            .insert(email.to_string(), (password.to_string(), session));
    }

    /// Replace the stored session without announcing it
    pub fn set_session(&self, session: Option<Session>) {
        lock(&self.inner).session = session;
    }

    /// Make `get_session` fail with `error`
    pub fn fail_get_session(&self, error: TodoError) {
        lock(&self.inner).get_session_failure = Some(error);
    }

    /// Store `session` and announce it as `event`
    pub fn emit(&self, event: AuthEvent, session: Option<Session>) {
        lock(&self.inner).session.clone_from(&session);
        // No subscribers is fine.
        let _ = self.events.send((event, session));
    }

    /// Number of live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(inner: &Mutex<AuthInner>) -> MutexGuard<'_, AuthInner> {
    inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl AuthProvider for MockAuthProvider {
    fn get_session(&self) -> impl Future<Output = Result<Option<Session>>> + Send {
        let result = {
            let inner = lock(&self.inner);
            match &inner.get_session_failure {
                Some(error) => Err(error.clone()),
                None => Ok(inner.session.clone()),
            }
        };
        async move { result }
    }

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send {
        let account = lock(&self.inner).accounts.get(email).cloned();
        let result = match account {
            Some((expected, session)) if expected == password => {
                self.emit(AuthEvent::SignedIn, Some(session.clone()));
                Ok(session)
            },
            _ => Err(TodoError::Remote("Invalid login credentials".to_string())),
        };
        async move { result }
    }

    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send {
        self.emit(AuthEvent::SignedOut, None);
        async { Ok(()) }
    }

    fn subscribe(&self) -> AuthChanges {
        let receiver = self.events.subscribe();
        futures::stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(change) => return Some((change, receiver)),
                    Err(broadcast::error::RecvError::Lagged(_)) => {},
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}
