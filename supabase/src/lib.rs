//! # Todoit Supabase
//!
//! Small client for a hosted Supabase project: GoTrue password auth with a
//! session change stream, and PostgREST table queries that carry the
//! signed-in user's token.
//!
//! ## Example
//!
//! ```no_run
//! use todoit_supabase::SupabaseClient;
//!
//! # async fn run() -> Result<(), todoit_supabase::SupabaseError> {
//! let client = SupabaseClient::new("https://xyzcompany.supabase.co", "anon-key".to_string())?;
//! let session = client.auth().sign_in_with_password("ada@example.com", "secret").await?;
//!
//! let rows: Vec<serde_json::Value> = client
//!     .from("todos")
//!     .select("*")
//!     .eq("user_id", &session.user.id)
//!     .order("created_at", false)
//!     .execute()
//!     .await?;
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod postgrest;
pub mod types;

pub use auth::{AuthChange, AuthClient, AuthSubscription};
pub use client::SupabaseClient;
pub use error::{Result, SupabaseError};
pub use postgrest::{FilterBuilder, TableQuery};
pub use types::{AuthChangeEvent, Session, User};
