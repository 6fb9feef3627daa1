//! In-memory `todos` table.

use crate::error::{Result, TodoError};
use crate::providers::TodoRepository;
use crate::types::{NewTodo, Todo, TodoId, UserId};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use todoit_core::environment::{Clock, SystemClock};

/// A call made against the repository, recorded in order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepoCall {
    /// `list(user_id)`
    List(UserId),
    /// `insert(row)`
    Insert(NewTodo),
    /// `set_completed(id, completed)`
    SetCompleted(TodoId, bool),
    /// `delete(id)`
    Delete(TodoId),
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Todo>,
    next_id: i64,
    calls: Vec<RepoCall>,
    failure: Option<TodoError>,
}

/// In-memory stand-in for the remote `todos` table.
///
/// Assigns ids and creation times like the real store and scopes `list` by
/// owner, so isolation and ordering can be checked without a network.
#[derive(Clone)]
pub struct InMemoryTodoRepository {
    table: Arc<Mutex<Table>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTodoRepository {
    /// Create an empty table stamped with the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty table stamped with `clock`
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Arc::new(Mutex::new(Table {
                next_id: 1,
                ..Table::default()
            })),
            clock,
        }
    }

    /// Insert a row directly, bypassing the call log
    pub fn seed(&self, user_id: UserId, text: &str, completed: bool) -> TodoId {
        let mut table = lock(&self.table);
        let id = TodoId::new(table.next_id);
        table.next_id += 1;
        table.rows.push(Todo {
            id,
            text: text.to_string(),
            completed,
            due_date: None,
            priority: crate::types::Priority::default(),
            category: crate::types::Category::default(),
            user_id,
            created_at: Some(self.clock.now()),
        });
        id
    }

    /// Make every following call fail with `error`
    pub fn fail_with(&self, error: TodoError) {
        lock(&self.table).failure = Some(error);
    }

    /// Stop failing calls
    pub fn recover(&self) {
        lock(&self.table).failure = None;
    }

    /// Calls made so far, oldest first
    #[must_use]
    pub fn calls(&self) -> Vec<RepoCall> {
        lock(&self.table).calls.clone()
    }

    /// Every stored row regardless of owner
    #[must_use]
    pub fn rows(&self) -> Vec<Todo> {
        lock(&self.table).rows.clone()
    }

    fn run<T>(&self, call: RepoCall, apply: impl FnOnce(&mut Table, &dyn Clock) -> T) -> Result<T> {
        let mut table = lock(&self.table);
        table.calls.push(call);
        if let Some(error) = table.failure.clone() {
            return Err(error);
        }
        Ok(apply(&mut table, self.clock.as_ref()))
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTodoRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTodoRepository").finish_non_exhaustive()
    }
}

// A poisoned table only means another test thread panicked mid-call; the rows
// themselves are still consistent.
fn lock(table: &Mutex<Table>) -> MutexGuard<'_, Table> {
    table.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl TodoRepository for InMemoryTodoRepository {
    fn list(&self, user_id: &UserId) -> impl Future<Output = Result<Vec<Todo>>> + Send {
        let user_id = user_id.clone();
        let result = self.run(RepoCall::List(user_id.clone()), |table, _| {
            let mut rows: Vec<Todo> = table
                .rows
                .iter()
                .filter(|row| row.user_id == user_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            rows
        });
        async move { result }
    }

    fn insert(&self, todo: &NewTodo) -> impl Future<Output = Result<()>> + Send {
        let new_todo = todo.clone();
        let result = self.run(RepoCall::Insert(todo.clone()), |table, clock| {
            let id = TodoId::new(table.next_id);
            table.next_id += 1;
            table.rows.push(Todo {
                id,
                text: new_todo.text,
                completed: new_todo.completed,
                due_date: new_todo.due_date,
                priority: new_todo.priority,
                category: new_todo.category,
                user_id: new_todo.user_id,
                created_at: Some(clock.now()),
            });
        });
        async move { result }
    }

    fn set_completed(&self, id: TodoId, completed: bool) -> impl Future<Output = Result<()>> + Send {
        let result = self.run(RepoCall::SetCompleted(id, completed), |table, _| {
            for row in table.rows.iter_mut().filter(|row| row.id == id) {
                row.completed = completed;
            }
        });
        async move { result }
    }

    fn delete(&self, id: TodoId) -> impl Future<Output = Result<()>> + Send {
        let result = self.run(RepoCall::Delete(id), |table, _| {
            table.rows.retain(|row| row.id != id);
        });
        async move { result }
    }
}
