//! Reducer for the todo client.
//!
//! Every remote write is followed by a full reload; the cached list is only
//! ever replaced by a reload result, never patched. Each reload carries a
//! generation number so an older response arriving late cannot overwrite a
//! newer one.

use crate::providers::{AuthEvent, AuthProvider, TodoRepository};
use crate::types::{Mutation, TodoAction, TodoDraft, TodoState, UserId};
use std::marker::PhantomData;
use todoit_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, SmallVec};

type Effects = SmallVec<[Effect<TodoAction>; 4]>;

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment<R, A> {
    /// Remote `todos` table
    pub todos: R,
    /// Auth provider
    pub auth: A,
}

impl<R, A> TodoEnvironment<R, A> {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub const fn new(todos: R, auth: A) -> Self {
        Self { todos, auth }
    }
}

/// Reducer for the todo client
pub struct TodoReducer<R, A> {
    _phantom: PhantomData<(R, A)>,
}

impl<R, A> TodoReducer<R, A> {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<R, A> Default for TodoReducer<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, A> Clone for TodoReducer<R, A> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<R, A> std::fmt::Debug for TodoReducer<R, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TodoReducer")
    }
}

impl<R, A> TodoReducer<R, A>
where
    R: TodoRepository + Clone + 'static,
    A: AuthProvider + Clone + 'static,
{
    /// Replace the identity; a present identity always triggers a reload
    fn apply_identity(
        state: &mut TodoState,
        identity: Option<UserId>,
        env: &TodoEnvironment<R, A>,
    ) -> Effects {
        match identity {
            Some(user) => {
                if state.identity.as_ref() != Some(&user) {
                    state.todos.clear();
                }
                state.identity = Some(user);
                Self::reload(state, env)
            },
            None => {
                if state.identity.take().is_some() {
                    tracing::info!("Signed out, clearing cached todos");
                }
                state.todos.clear();
                state.draft = TodoDraft::default();
                smallvec![Effect::None]
            },
        }
    }

    /// Issue a new reload generation for the current identity
    fn reload(state: &mut TodoState, env: &TodoEnvironment<R, A>) -> Effects {
        let Some(user) = state.identity.clone() else {
            tracing::debug!("Reload skipped: not signed in");
            return smallvec![Effect::None];
        };

        state.reload_generation += 1;
        let generation = state.reload_generation;
        let todos = env.todos.clone();

        tracing::debug!(user_id = %user, generation, "Reloading todos");

        smallvec![async_effect! {
            let result = todos.list(&user).await;
            match result {
                Ok(rows) => Some(TodoAction::TodosLoaded {
                    generation,
                    identity: user,
                    todos: rows,
                }),
                Err(error) => Some(TodoAction::ReloadFailed { generation, error }),
            }
        }]
    }

    fn add(state: &TodoState, draft: &TodoDraft, env: &TodoEnvironment<R, A>) -> Effects {
        let Some(user) = state.identity.as_ref() else {
            tracing::debug!("Add ignored: not signed in");
            return smallvec![Effect::None];
        };
        let Some(new_todo) = draft.to_new_todo(user) else {
            tracing::debug!("Add ignored: blank text");
            return smallvec![Effect::None];
        };

        let todos = env.todos.clone();
        smallvec![async_effect! {
            match todos.insert(&new_todo).await {
                Ok(()) => Some(TodoAction::TodoAdded),
                Err(error) => Some(TodoAction::MutationFailed {
                    mutation: Mutation::Add,
                    error,
                }),
            }
        }]
    }
}

impl<R, A> Reducer for TodoReducer<R, A>
where
    R: TodoRepository + Clone + 'static,
    A: AuthProvider + Clone + 'static,
{
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment<R, A>;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Session ==========
            TodoAction::RestoreSession => {
                state.auth_changed_since_restore = false;
                let auth = env.auth.clone();
                smallvec![async_effect! {
                    match auth.get_session().await {
                        Ok(session) => Some(TodoAction::SessionRestored {
                            identity: session.map(|session| session.user_id),
                        }),
                        Err(error) => Some(TodoAction::SessionRestoreFailed { error }),
                    }
                }]
            },

            TodoAction::SessionRestored { .. } if state.auth_changed_since_restore => {
                tracing::debug!("Dropping restored session superseded by an auth change");
                smallvec![Effect::None]
            },

            TodoAction::SessionRestored { identity } => Self::apply_identity(state, identity, env),

            TodoAction::SessionRestoreFailed { error } => {
                tracing::error!(%error, "Error restoring session");
                smallvec![Effect::None]
            },

            TodoAction::AuthStateChanged { event, identity } => {
                tracing::debug!(%event, signed_in = identity.is_some(), "Auth state changed");
                state.auth_changed_since_restore = true;
                Self::apply_identity(state, identity, env)
            },

            TodoAction::SignOut => {
                let auth = env.auth.clone();
                smallvec![async_effect! {
                    match auth.sign_out().await {
                        Ok(()) => Some(TodoAction::AuthStateChanged {
                            event: AuthEvent::SignedOut,
                            identity: None,
                        }),
                        Err(error) => Some(TodoAction::SignOutFailed { error }),
                    }
                }]
            },

            TodoAction::SignOutFailed { error } => {
                tracing::error!(%error, "Error signing out");
                smallvec![Effect::None]
            },

            // ========== Sync ==========
            TodoAction::Reload => Self::reload(state, env),

            TodoAction::TodosLoaded {
                generation,
                identity,
                todos,
            } => {
                if generation != state.reload_generation {
                    tracing::debug!(
                        generation,
                        latest = state.reload_generation,
                        "Discarding superseded reload"
                    );
                } else if state.identity.as_ref() != Some(&identity) {
                    tracing::debug!(user_id = %identity, "Discarding reload for previous identity");
                } else {
                    tracing::debug!(count = todos.len(), generation, "Todos loaded");
                    state.todos = todos;
                }
                smallvec![Effect::None]
            },

            TodoAction::ReloadFailed { generation, error } => {
                tracing::error!(%error, generation, "Error loading todos");
                smallvec![Effect::None]
            },

            TodoAction::AddTodo { draft } => Self::add(state, &draft, env),

            TodoAction::SubmitDraft => Self::add(state, &state.draft, env),

            TodoAction::TodoAdded => {
                state.draft.reset();
                Self::reload(state, env)
            },

            TodoAction::ToggleTodo { id } => {
                let Some(cached) = state.get(id) else {
                    tracing::debug!(%id, "Toggle ignored: row not loaded");
                    return smallvec![Effect::None];
                };

                let completed = !cached.completed;
                let todos = env.todos.clone();
                smallvec![async_effect! {
                    match todos.set_completed(id, completed).await {
                        Ok(()) => Some(TodoAction::TodoToggled { id }),
                        Err(error) => Some(TodoAction::MutationFailed {
                            mutation: Mutation::Toggle(id),
                            error,
                        }),
                    }
                }]
            },

            TodoAction::DeleteTodo { id } => {
                let todos = env.todos.clone();
                smallvec![async_effect! {
                    match todos.delete(id).await {
                        Ok(()) => Some(TodoAction::TodoDeleted { id }),
                        Err(error) => Some(TodoAction::MutationFailed {
                            mutation: Mutation::Delete(id),
                            error,
                        }),
                    }
                }]
            },

            TodoAction::TodoToggled { .. } | TodoAction::TodoDeleted { .. } => {
                Self::reload(state, env)
            },

            TodoAction::MutationFailed { mutation, error } => {
                match mutation {
                    Mutation::Add => tracing::error!(%error, "Error adding todo"),
                    Mutation::Toggle(id) => tracing::error!(%error, %id, "Error updating todo"),
                    Mutation::Delete(id) => tracing::error!(%error, %id, "Error deleting todo"),
                }
                smallvec![Effect::None]
            },

            // ========== Form & view ==========
            TodoAction::SetDraftText(text) => {
                state.draft.text = text;
                smallvec![Effect::None]
            },
            TodoAction::SetDraftDueDate(due_date) => {
                state.draft.due_date = due_date;
                smallvec![Effect::None]
            },
            TodoAction::SetDraftPriority(priority) => {
                state.draft.priority = priority;
                smallvec![Effect::None]
            },
            TodoAction::SetDraftCategory(category) => {
                state.draft.category = category;
                smallvec![Effect::None]
            },
            TodoAction::SetStatusFilter(status) => {
                state.filter.status = status;
                smallvec![Effect::None]
            },
            TodoAction::SetCategoryFilter(category) => {
                state.filter.category = category;
                smallvec![Effect::None]
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::TodoError;
    use crate::filter::StatusFilter;
    use crate::mocks::{InMemoryTodoRepository, MockAuthProvider, RepoCall};
    use crate::providers::Session;
    use crate::types::{Category, NewTodo, Priority, Todo, TodoId};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use todoit_testing::{assertions, stepping_test_clock, ReducerTest};

    type TestReducer = TodoReducer<InMemoryTodoRepository, MockAuthProvider>;
    type TestEnv = TodoEnvironment<InMemoryTodoRepository, MockAuthProvider>;

    fn env() -> TestEnv {
        TodoEnvironment::new(
            InMemoryTodoRepository::with_clock(Arc::new(stepping_test_clock())),
            MockAuthProvider::new(),
        )
    }

    fn u1() -> UserId {
        UserId::from("u1")
    }

    fn row(id: i64, text: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id),
            text: text.to_string(),
            completed,
            due_date: None,
            priority: Priority::Medium,
            category: Category::Personal,
            user_id: u1(),
            created_at: None,
        }
    }

    #[test]
    fn test_session_restored_sets_identity_and_reloads() {
        let env = env();
        env.todos.seed(u1(), "Buy milk", false);

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(TodoState::new())
            .when_action(TodoAction::SessionRestored { identity: Some(u1()) })
            .then_state(|state| {
                assert_eq!(state.identity, Some(u1()));
                assert_eq!(state.reload_generation, 1);
            })
            .then_feedback(|actions| match actions {
                [TodoAction::TodosLoaded { generation: 1, identity, todos }] => {
                    assert_eq!(identity, &u1());
                    assert_eq!(todos.len(), 1);
                },
                other => panic!("unexpected feedback: {other:?}"),
            })
            .run();
    }

    #[test]
    fn test_restore_answer_after_sign_out_is_dropped() {
        let state = TodoState {
            auth_changed_since_restore: true,
            ..TodoState::new()
        };

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::SessionRestored { identity: Some(u1()) })
            .then_state(|state| {
                assert_eq!(state.identity, None);
                assert_eq!(state.reload_generation, 0);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_auth_change_marks_pending_restore_stale() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(TodoState::new())
            .when_action(TodoAction::AuthStateChanged {
                event: AuthEvent::SignedOut,
                identity: None,
            })
            .then_state(|state| assert!(state.auth_changed_since_restore))
            .run();
    }

    #[test]
    fn test_restore_request_clears_stale_marker() {
        let state = TodoState {
            auth_changed_since_restore: true,
            ..TodoState::new()
        };

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::RestoreSession)
            .then_state(|state| assert!(!state.auth_changed_since_restore))
            .run();
    }

    #[test]
    fn test_restore_without_session_reports_no_identity() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(TodoState::new())
            .when_action(TodoAction::RestoreSession)
            .then_effects(assertions::assert_has_future_effect)
            .then_feedback(|actions| {
                assert_eq!(actions, [TodoAction::SessionRestored { identity: None }]);
            })
            .run();
    }

    #[test]
    fn test_token_refresh_reloads_again() {
        let mut state = TodoState::signed_in(u1());
        state.reload_generation = 3;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::AuthStateChanged {
                event: AuthEvent::TokenRefreshed,
                identity: Some(u1()),
            })
            .then_state(|state| assert_eq!(state.reload_generation, 4))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_sign_out_event_clears_identity_list_and_form() {
        let mut state = TodoState::signed_in(u1());
        state.todos = vec![row(1, "Buy milk", false)];
        state.draft = TodoDraft::text("half typed");

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::AuthStateChanged {
                event: AuthEvent::SignedOut,
                identity: None,
            })
            .then_state(|state| {
                assert_eq!(state.identity, None);
                assert!(state.todos.is_empty());
                assert_eq!(state.draft, TodoDraft::default());
            })
            .then_effects(assertions::assert_only_noop_effects)
            .run();
    }

    #[test]
    fn test_switching_identity_drops_previous_rows() {
        let mut state = TodoState::signed_in(u1());
        state.todos = vec![row(1, "Buy milk", false)];

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::AuthStateChanged {
                event: AuthEvent::SignedIn,
                identity: Some(UserId::from("u2")),
            })
            .then_state(|state| {
                assert_eq!(state.identity, Some(UserId::from("u2")));
                assert!(state.todos.is_empty());
            })
            .run();
    }

    #[test]
    fn test_reload_without_identity_is_noop() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Reload)
            .then_state(|state| assert_eq!(state.reload_generation, 0))
            .then_effects(assertions::assert_only_noop_effects)
            .run();
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut state = TodoState::signed_in(u1());
        state.todos = vec![row(2, "fresh", false)];

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::Reload)
            .when_action(TodoAction::Reload)
            .when_action(TodoAction::TodosLoaded {
                generation: 1,
                identity: u1(),
                todos: vec![row(1, "stale", false)],
            })
            .then_state(|state| {
                assert_eq!(state.reload_generation, 2);
                assert_eq!(state.todos, vec![row(2, "fresh", false)]);
            })
            .run();
    }

    #[test]
    fn test_rows_for_previous_identity_are_discarded() {
        let mut state = TodoState::signed_in(UserId::from("u2"));
        state.reload_generation = 1;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::TodosLoaded {
                generation: 1,
                identity: u1(),
                todos: vec![row(1, "Buy milk", false)],
            })
            .then_state(|state| assert!(state.todos.is_empty()))
            .run();
    }

    #[test]
    fn test_current_generation_replaces_list() {
        let mut state = TodoState::signed_in(u1());
        state.reload_generation = 5;
        state.todos = vec![row(1, "old", false)];

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::TodosLoaded {
                generation: 5,
                identity: u1(),
                todos: vec![row(3, "c", false), row(2, "b", true)],
            })
            .then_state(|state| {
                let ids: Vec<i64> = state.todos.iter().map(|todo| todo.id.get()).collect();
                assert_eq!(ids, vec![3, 2]);
            })
            .then_effects(assertions::assert_only_noop_effects)
            .run();
    }

    #[test]
    fn test_reload_failure_keeps_list() {
        let env = env();
        env.todos.fail_with(TodoError::Remote("connection reset".to_string()));

        let mut state = TodoState::signed_in(u1());
        state.todos = vec![row(1, "Buy milk", false)];

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(state)
            .when_action(TodoAction::Reload)
            .then_state(|state| assert_eq!(state.todos.len(), 1))
            .then_feedback(|actions| {
                assert!(matches!(actions, [TodoAction::ReloadFailed { generation: 1, .. }]));
            })
            .run();
    }

    #[test]
    fn test_add_inserts_row_from_draft() {
        let env = env();
        let repo = env.todos.clone();
        let draft = TodoDraft {
            text: "  Write report ".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            priority: Priority::High,
            category: Category::Work,
        };

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(TodoState::signed_in(u1()))
            .when_action(TodoAction::AddTodo { draft })
            .then_feedback(move |actions| {
                assert_eq!(actions, [TodoAction::TodoAdded]);
                assert_eq!(
                    repo.calls(),
                    vec![RepoCall::Insert(NewTodo {
                        text: "Write report".to_string(),
                        completed: false,
                        due_date: NaiveDate::from_ymd_opt(2025, 2, 1),
                        priority: Priority::High,
                        category: Category::Work,
                        user_id: u1(),
                    })]
                );
            })
            .run();
    }

    #[test]
    fn test_blank_add_is_silent_noop() {
        let env = env();
        let repo = env.todos.clone();

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(TodoState::signed_in(u1()))
            .when_action(TodoAction::AddTodo {
                draft: TodoDraft::text("   "),
            })
            .then_effects(assertions::assert_only_noop_effects)
            .then_feedback(move |actions| {
                assert!(actions.is_empty());
                assert!(repo.calls().is_empty());
            })
            .run();
    }

    #[test]
    fn test_add_requires_identity() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(TodoState::new())
            .when_action(TodoAction::AddTodo {
                draft: TodoDraft::text("Buy milk"),
            })
            .then_effects(assertions::assert_only_noop_effects)
            .run();
    }

    #[test]
    fn test_submit_uses_form_in_state() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(TodoState::signed_in(u1()))
            .when_action(TodoAction::SetDraftText("Call mom".to_string()))
            .when_action(TodoAction::SetDraftCategory(Category::Work))
            .when_action(TodoAction::SubmitDraft)
            .then_feedback(|actions| assert_eq!(actions, [TodoAction::TodoAdded]))
            .run();
    }

    #[test]
    fn test_added_resets_form_but_keeps_category_and_reloads() {
        let mut state = TodoState::signed_in(u1());
        state.draft = TodoDraft {
            text: "Call mom".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 2, 1),
            priority: Priority::Low,
            category: Category::Shopping,
        };

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::TodoAdded)
            .then_state(|state| {
                assert!(state.draft.text.is_empty());
                assert_eq!(state.draft.due_date, None);
                assert_eq!(state.draft.priority, Priority::Medium);
                assert_eq!(state.draft.category, Category::Shopping);
                assert_eq!(state.reload_generation, 1);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_toggle_flips_cached_flag() {
        let env = env();
        let repo = env.todos.clone();
        let mut state = TodoState::signed_in(u1());
        state.todos = vec![row(7, "Buy milk", false)];

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(state)
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(7) })
            .then_state(|state| assert!(!state.todos[0].completed))
            .then_feedback(move |actions| {
                assert_eq!(actions, [TodoAction::TodoToggled { id: TodoId::new(7) }]);
                assert_eq!(repo.calls(), vec![RepoCall::SetCompleted(TodoId::new(7), true)]);
            })
            .run();
    }

    #[test]
    fn test_toggle_of_unknown_row_is_noop() {
        let env = env();
        let repo = env.todos.clone();

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(TodoState::signed_in(u1()))
            .when_action(TodoAction::ToggleTodo { id: TodoId::new(99) })
            .then_effects(assertions::assert_only_noop_effects)
            .then_feedback(move |_| assert!(repo.calls().is_empty()))
            .run();
    }

    #[test]
    fn test_delete_success_reloads() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(TodoState::signed_in(u1()))
            .when_action(TodoAction::TodoDeleted { id: TodoId::new(1) })
            .then_state(|state| assert_eq!(state.reload_generation, 1))
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_failed_delete_reports_mutation() {
        let env = env();
        env.todos.fail_with(TodoError::Remote("permission denied".to_string()));

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(TodoState::signed_in(u1()))
            .when_action(TodoAction::DeleteTodo { id: TodoId::new(4) })
            .then_feedback(|actions| {
                assert_eq!(
                    actions,
                    [TodoAction::MutationFailed {
                        mutation: Mutation::Delete(TodoId::new(4)),
                        error: TodoError::Remote("permission denied".to_string()),
                    }]
                );
            })
            .run();
    }

    #[test]
    fn test_mutation_failure_leaves_state_untouched() {
        let mut state = TodoState::signed_in(u1());
        state.todos = vec![row(1, "Buy milk", false)];
        state.reload_generation = 2;

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::MutationFailed {
                mutation: Mutation::Toggle(TodoId::new(1)),
                error: TodoError::Remote("timeout".to_string()),
            })
            .then_state(|state| {
                assert_eq!(state.todos.len(), 1);
                assert_eq!(state.reload_generation, 2);
            })
            .then_effects(assertions::assert_only_noop_effects)
            .run();
    }

    #[test]
    fn test_sign_out_success_clears_identity() {
        let env = env();
        env.auth.set_session(Some(Session::for_user("u1")));

        ReducerTest::new(TestReducer::new())
            .with_env(env)
            .given_state(TodoState::signed_in(u1()))
            .when_action(TodoAction::SignOut)
            .then_feedback(|actions| {
                assert_eq!(
                    actions,
                    [TodoAction::AuthStateChanged {
                        event: AuthEvent::SignedOut,
                        identity: None,
                    }]
                );
            })
            .run();
    }

    #[test]
    fn test_selectors_update_view() {
        let mut state = TodoState::signed_in(u1());
        state.todos = vec![row(2, "b", true), row(1, "a", false)];

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TodoAction::SetStatusFilter(StatusFilter::Completed))
            .then_state(|state| {
                let visible: Vec<i64> = state.visible_todos().iter().map(|todo| todo.id.get()).collect();
                assert_eq!(visible, vec![2]);
            })
            .then_effects(assertions::assert_only_noop_effects)
            .run();
    }
}
