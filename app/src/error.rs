//! Error types for the todo client

use thiserror::Error;
use todoit_supabase::SupabaseError;

/// Result type alias for todo operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Errors surfaced by repositories, auth providers and configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// The remote store rejected or failed the request
    #[error("Remote store error: {0}")]
    Remote(String),

    /// No signed-in session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal failure (poisoned lock, closed channel)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SupabaseError> for TodoError {
    fn from(error: SupabaseError) -> Self {
        match error {
            SupabaseError::NotAuthenticated => Self::NotAuthenticated,
            other => Self::Remote(other.to_string()),
        }
    }
}
