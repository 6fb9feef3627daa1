//! Domain types for the todo client.
//!
//! Rows mirror the `todos` table: the store assigns `id` and `created_at`,
//! everything else comes from the add form.

use crate::error::TodoError;
use crate::filter::{self, Counts, TodoFilter};
use crate::providers::AuthEvent;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Opaque user id issued by the auth provider
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps a raw id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned row id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Priority tag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low
    Low,
    /// Medium, the form default
    #[default]
    Medium,
    /// High
    High,
}

impl Priority {
    /// Wire and display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority '{other}' (expected low, medium or high)")),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category tag
///
/// The column is free-form text. The three values the form offers get their
/// own variant; anything else written by another client is kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// `personal`, the form default
    #[default]
    Personal,
    /// `work`
    Work,
    /// `shopping`
    Shopping,
    /// Any other value
    Other(String),
}

impl Category {
    /// Wire and display label
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Shopping => "shopping",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "personal" | "" => Self::Personal,
            "work" => Self::Work,
            "shopping" => Self::Shopping,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(other) => other,
            named => named.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `todos` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned id
    pub id: TodoId,
    /// Task description
    pub text: String,
    /// Done flag
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    /// Optional due date (`dueDate` column)
    #[serde(rename = "dueDate", default, deserialize_with = "due_date_from_wire")]
    pub due_date: Option<NaiveDate>,
    /// Priority tag; unknown values read as medium
    #[serde(default, deserialize_with = "priority_from_wire")]
    pub priority: Priority,
    /// Category tag
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    /// Owner
    pub user_id: UserId,
    /// Store-assigned creation time, used for ordering
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new row
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    /// Trimmed task description
    pub text: String,
    /// Always `false` on insert
    pub completed: bool,
    /// Optional due date
    #[serde(rename = "dueDate")]
    pub due_date: Option<NaiveDate>,
    /// Priority tag
    pub priority: Priority,
    /// Category tag
    pub category: Category,
    /// Owner
    pub user_id: UserId,
}

/// Contents of the add form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoDraft {
    /// Text as typed
    pub text: String,
    /// Chosen due date
    pub due_date: Option<NaiveDate>,
    /// Chosen priority
    pub priority: Priority,
    /// Chosen category
    pub category: Category,
}

impl TodoDraft {
    /// Draft with just text, other fields at their defaults
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Build the insert payload
    ///
    /// Returns `None` for blank text.
    #[must_use]
    pub fn to_new_todo(&self, user_id: &UserId) -> Option<NewTodo> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }

        Some(NewTodo {
            text: text.to_string(),
            completed: false,
            due_date: self.due_date,
            priority: self.priority,
            category: self.category.clone(),
            user_id: user_id.clone(),
        })
    }

    /// Clear the form after a successful add
    ///
    /// The category sticks so several tasks can be filed under it in a row.
    pub fn reset(&mut self) {
        self.text.clear();
        self.due_date = None;
        self.priority = Priority::Medium;
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// Rows may have been written by other clients, so a malformed tag or date
// degrades to its default instead of failing the whole list.
fn due_date_from_wire<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let date = match &raw {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) if text.trim().is_empty() => None,
        serde_json::Value::String(text) => {
            let parsed = parse_due_date(text.trim());
            if parsed.is_none() {
                tracing::warn!(due_date = %text, "Ignoring unreadable due date");
            }
            parsed
        },
        other => {
            tracing::warn!(due_date = %other, "Ignoring non-text due date");
            None
        },
    };
    Ok(date)
}

/// `YYYY-MM-DD`, or the date part of a timestamp
fn parse_due_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|at| at.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|at| at.date())
        })
}

fn priority_from_wire<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let priority = match &raw {
        serde_json::Value::Null => Priority::default(),
        serde_json::Value::String(text) => text.parse::<Priority>().unwrap_or_else(|_| {
            tracing::warn!(priority = %text, "Unknown priority, showing as medium");
            Priority::default()
        }),
        other => {
            tracing::warn!(priority = %other, "Non-text priority, showing as medium");
            Priority::default()
        },
    };
    Ok(priority)
}

/// Which remote write failed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Insert of a new row
    Add,
    /// Completion flip of a row
    Toggle(TodoId),
    /// Removal of a row
    Delete(TodoId),
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Toggle(id) => write!(f, "toggle {id}"),
            Self::Delete(id) => write!(f, "delete {id}"),
        }
    }
}

/// Client state
///
/// `todos` is always the full snapshot returned by the last applied reload
/// for `identity`; it is never patched locally.
#[derive(Clone, Debug, Default)]
pub struct TodoState {
    /// Signed-in user, if any
    pub identity: Option<UserId>,
    /// Rows of the current user, newest first
    pub todos: Vec<Todo>,
    /// Add form
    pub draft: TodoDraft,
    /// View selectors
    pub filter: TodoFilter,
    /// Number of reloads issued so far
    pub reload_generation: u64,
    /// An auth change arrived after the last restore was requested; a late
    /// restore answer is stale and gets dropped.
    pub auth_changed_since_restore: bool,
}

impl TodoState {
    /// Creates a signed-out state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State for `user` with nothing loaded yet
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        Self {
            identity: Some(user),
            ..Self::default()
        }
    }

    /// Cached row by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Rows passing the current selectors, in list order
    #[must_use]
    pub fn visible_todos(&self) -> Vec<&Todo> {
        filter::visible(&self.todos, &self.filter)
    }

    /// Totals over all cached rows
    #[must_use]
    pub fn counts(&self) -> Counts {
        filter::counts(&self.todos)
    }
}

/// Actions for the todo client
#[derive(Clone, Debug, PartialEq)]
pub enum TodoAction {
    // ========== Session ==========
    /// Ask the auth provider for an existing session
    RestoreSession,

    /// Session lookup finished
    SessionRestored {
        /// User of the restored session
        identity: Option<UserId>,
    },

    /// Session lookup failed
    SessionRestoreFailed {
        /// Reason
        error: TodoError,
    },

    /// The auth provider announced a change
    AuthStateChanged {
        /// Kind of change
        event: AuthEvent,
        /// User of the new session, `None` when signed out
        identity: Option<UserId>,
    },

    /// End the session
    SignOut,

    /// Sign-out request failed
    SignOutFailed {
        /// Reason
        error: TodoError,
    },

    // ========== Sync ==========
    /// Fetch all rows of the current user
    Reload,

    /// A reload returned
    TodosLoaded {
        /// Generation of the reload that produced these rows
        generation: u64,
        /// User the rows were fetched for
        identity: UserId,
        /// Rows, newest first
        todos: Vec<Todo>,
    },

    /// A reload failed
    ReloadFailed {
        /// Generation of the failed reload
        generation: u64,
        /// Reason
        error: TodoError,
    },

    /// Insert a row built from `draft`
    AddTodo {
        /// Form contents
        draft: TodoDraft,
    },

    /// Insert a row built from the form held in state
    SubmitDraft,

    /// Insert succeeded
    TodoAdded,

    /// Flip the completion flag of a cached row
    ToggleTodo {
        /// Row to flip
        id: TodoId,
    },

    /// Update succeeded
    TodoToggled {
        /// Row that was flipped
        id: TodoId,
    },

    /// Remove a row
    DeleteTodo {
        /// Row to remove
        id: TodoId,
    },

    /// Delete succeeded
    TodoDeleted {
        /// Row that was removed
        id: TodoId,
    },

    /// A remote write failed
    MutationFailed {
        /// Which write
        mutation: Mutation,
        /// Reason
        error: TodoError,
    },

    // ========== Form & view ==========
    /// Set the form text
    SetDraftText(String),
    /// Set the form due date
    SetDraftDueDate(Option<NaiveDate>),
    /// Set the form priority
    SetDraftPriority(Priority),
    /// Set the form category
    SetDraftCategory(Category),
    /// Set the status selector
    SetStatusFilter(filter::StatusFilter),
    /// Set the category selector
    SetCategoryFilter(filter::CategoryFilter),
}
