//! # Todoit
//!
//! Personal todo client synced to a hosted Supabase project.
//!
//! The client state lives in a [`todoit_runtime::Store`] driven by
//! [`TodoReducer`]. The reducer never edits the cached list itself: each
//! add, toggle or delete is sent to the remote table and followed by a full
//! reload, so the list always mirrors the store.
//!
//! - [`session::SessionHolder`] feeds auth changes into the store
//! - [`filter`] computes the visible rows
//! - [`adapters`] talk to Supabase, [`mocks`] keep everything in memory
//!
//! # Quick Start
//!
//! ```no_run
//! use todoit::mocks::{InMemoryTodoRepository, MockAuthProvider};
//! use todoit::{SessionHolder, TodoAction, TodoDraft, TodoEnvironment, TodoReducer, TodoState};
//! use todoit_runtime::Store;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = MockAuthProvider::new();
//! auth.add_account("ada@example.com", "secret", "u1");
//!
//! let env = TodoEnvironment::new(InMemoryTodoRepository::new(), auth.clone());
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//! let _holder = SessionHolder::mount(&store).await?;
//!
//! use todoit::providers::AuthProvider;
//! auth.sign_in_with_password("ada@example.com", "secret").await?;
//! store.wait_until_idle(Duration::from_secs(1)).await?;
//!
//! store.send(TodoAction::AddTodo { draft: TodoDraft::text("Buy milk") }).await?;
//! store.wait_until_idle(Duration::from_secs(1)).await?;
//!
//! let count = store.state(|s| s.todos.len()).await;
//! assert_eq!(count, 1);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod mocks;
pub mod providers;
pub mod reducer;
pub mod render;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use config::TodoitConfig;
pub use error::{Result, TodoError};
pub use filter::{CategoryFilter, StatusFilter, TodoFilter};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use session::{SessionHolder, TodoStore};
pub use types::{Category, Priority, Todo, TodoAction, TodoDraft, TodoId, TodoState, UserId};
