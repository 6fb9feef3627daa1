//! Session holder.
//!
//! Bridges the auth provider's change stream into the store for as long as
//! the holder is alive. Dropping the holder (or calling
//! [`SessionHolder::unmount`]) stops the forwarding task and releases the
//! subscription.

use crate::providers::{AuthProvider, TodoRepository};
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoState};
use futures::StreamExt;
use tokio::task::JoinHandle;
use todoit_runtime::{Store, StoreError};

/// Store type used by the client
pub type TodoStore<R, A> = Store<TodoState, TodoAction, TodoEnvironment<R, A>, TodoReducer<R, A>>;

/// Keeps the store's identity in sync with the auth provider
#[derive(Debug)]
pub struct SessionHolder {
    forwarder: Option<JoinHandle<()>>,
}

impl SessionHolder {
    /// Subscribe to auth changes, then look up the existing session
    ///
    /// The subscription is taken before the lookup so a change racing with
    /// startup is not lost.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store no longer
    /// accepts actions; nothing stays subscribed in that case.
    pub async fn mount<R, A>(store: &TodoStore<R, A>) -> Result<Self, StoreError>
    where
        R: TodoRepository + Clone + 'static,
        A: AuthProvider + Clone + 'static,
    {
        let mut changes = store.environment().auth.subscribe();
        let forward_to = store.clone();

        let forwarder = tokio::spawn(async move {
            while let Some((event, session)) = changes.next().await {
                let action = TodoAction::AuthStateChanged {
                    event,
                    identity: session.map(|session| session.user_id),
                };
                if let Err(error) = forward_to.send(action).await {
                    tracing::warn!(%error, "Store rejected auth change, stopping forwarder");
                    break;
                }
            }
            tracing::debug!("Auth change forwarding finished");
        });

        let holder = Self {
            forwarder: Some(forwarder),
        };
        store.send(TodoAction::RestoreSession).await?;

        tracing::debug!("Session holder mounted");
        Ok(holder)
    }

    /// Whether the forwarding task is still attached
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.forwarder
            .as_ref()
            .is_some_and(|forwarder| !forwarder.is_finished())
    }

    /// Stop forwarding auth changes
    pub fn unmount(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
            tracing::debug!("Session holder unmounted");
        }
    }
}

impl Drop for SessionHolder {
    fn drop(&mut self) {
        self.detach();
    }
}
