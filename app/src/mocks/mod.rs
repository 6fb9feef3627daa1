//! In-memory providers for tests and offline demos.

mod auth;
mod todos;

pub use auth::MockAuthProvider;
pub use todos::{InMemoryTodoRepository, RepoCall};
