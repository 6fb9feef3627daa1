//! Supabase-backed providers.

use crate::error::Result;
use crate::providers::{AuthChanges, AuthEvent, AuthProvider, Session, TodoRepository};
use crate::types::{NewTodo, Todo, TodoId, UserId};
use futures::StreamExt;
use serde::Serialize;
use std::future::Future;
use todoit_supabase::{AuthChangeEvent, SupabaseClient};

/// The `todos` table of a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTodoRepository {
    client: SupabaseClient,
    table: String,
}

impl SupabaseTodoRepository {
    /// Repository over `table`
    #[must_use]
    pub fn new(client: SupabaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletedPatch {
    completed: bool,
}

/// A row that cannot be read at all is left out of the list.
fn decode_row(row: serde_json::Value) -> Option<Todo> {
    match serde_json::from_value(row) {
        Ok(todo) => Some(todo),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping unreadable todo row");
            None
        },
    }
}

impl TodoRepository for SupabaseTodoRepository {
    fn list(&self, user_id: &UserId) -> impl Future<Output = Result<Vec<Todo>>> + Send {
        let query = self
            .client
            .from(&self.table)
            .select("*")
            .eq("user_id", user_id)
            .order("created_at", false);

        async move {
            let rows = query.execute::<serde_json::Value>().await?;
            Ok(rows.into_iter().filter_map(decode_row).collect())
        }
    }

    fn insert(&self, todo: &NewTodo) -> impl Future<Output = Result<()>> + Send {
        let query = self.client.from(&self.table).insert(&[todo]);
        async move { Ok(query.execute_empty().await?) }
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> impl Future<Output = Result<()>> + Send {
        let query = self
            .client
            .from(&self.table)
            .update(&CompletedPatch { completed })
            .eq("id", id);

        async move { Ok(query.execute_empty().await?) }
    }

    fn delete(&self, id: TodoId) -> impl Future<Output = Result<()>> + Send {
        let query = self.client.from(&self.table).delete().eq("id", id);
        async move { Ok(query.execute_empty().await?) }
    }
}

/// Supabase auth as an [`AuthProvider`]
#[derive(Debug, Clone)]
pub struct SupabaseAuthProvider {
    client: SupabaseClient,
}

impl SupabaseAuthProvider {
    /// Provider sharing `client`'s session
    #[must_use]
    pub const fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

fn to_session(session: todoit_supabase::Session) -> Session {
    Session {
        user_id: UserId::new(session.user.id),
        email: session.user.email,
    }
}

impl From<AuthChangeEvent> for AuthEvent {
    fn from(event: AuthChangeEvent) -> Self {
        match event {
            AuthChangeEvent::InitialSession => Self::InitialSession,
            AuthChangeEvent::SignedIn => Self::SignedIn,
            AuthChangeEvent::SignedOut => Self::SignedOut,
            AuthChangeEvent::TokenRefreshed => Self::TokenRefreshed,
            AuthChangeEvent::UserUpdated => Self::UserUpdated,
        }
    }
}

impl AuthProvider for SupabaseAuthProvider {
    fn get_session(&self) -> impl Future<Output = Result<Option<Session>>> + Send {
        let auth = self.client.auth().clone();
        async move { Ok(auth.get_session().await?.map(to_session)) }
    }

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session>> + Send {
        let auth = self.client.auth().clone();
        let email = email.to_string();
        let password = password.to_string();
        async move {
            let session = auth.sign_in_with_password(&email, &password).await?;
            Ok(to_session(session))
        }
    }

    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send {
        let auth = self.client.auth().clone();
        async move { Ok(auth.sign_out().await?) }
    }

    fn subscribe(&self) -> AuthChanges {
        let subscription = self.client.auth().on_auth_state_change();
        futures::stream::unfold(subscription, |mut subscription| async move {
            let (event, session) = subscription.recv().await?;
            Some(((event.into(), session.map(to_session)), subscription))
        })
        .boxed()
    }
}
