//! Store action broadcasting
//!
//! Fed-back actions are what the REPL and the session tests observe to know
//! a remote round trip finished.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::time::Duration;
use todoit_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use todoit_runtime::{Store, StoreError};

#[derive(Debug, Clone, PartialEq)]
enum SyncAction {
    /// Write then refetch, like add/toggle/delete
    Mutate { id: u64 },
    Written { id: u64 },
    Fetched { generation: u64 },
    /// Refetch only
    Refresh,
    /// Never answered
    Hang,
    Ping,
    Pong { count: u32 },
}

#[derive(Debug, Clone, Default)]
struct SyncState {
    generation: u64,
    applied: Vec<u64>,
    written: Vec<u64>,
    pings: u32,
}

#[derive(Clone)]
struct SyncEnv;

#[derive(Clone)]
struct SyncReducer;

impl SyncReducer {
    fn fetch(state: &mut SyncState) -> SmallVec<[Effect<SyncAction>; 4]> {
        state.generation += 1;
        let generation = state.generation;
        smallvec![Effect::Future(Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Some(SyncAction::Fetched { generation })
        }))]
    }
}

impl Reducer for SyncReducer {
    type State = SyncState;
    type Action = SyncAction;
    type Environment = SyncEnv;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SyncAction::Mutate { id } => smallvec![Effect::Future(Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Some(SyncAction::Written { id })
            }))],
            SyncAction::Written { id } => {
                state.written.push(id);
                Self::fetch(state)
            },
            SyncAction::Refresh => Self::fetch(state),
            SyncAction::Fetched { generation } => {
                if generation == state.generation {
                    state.applied.push(generation);
                }
                smallvec![Effect::None]
            },
            SyncAction::Hang => smallvec![Effect::None],
            SyncAction::Ping => {
                state.pings += 1;
                let count = state.pings;
                smallvec![Effect::Future(Box::pin(async move { Some(SyncAction::Pong { count }) }))]
            },
            SyncAction::Pong { .. } => smallvec![Effect::None],
        }
    }
}

fn store() -> Store<SyncState, SyncAction, SyncEnv, SyncReducer> {
    Store::new(SyncState::default(), SyncReducer, SyncEnv)
}

#[tokio::test]
async fn test_wait_for_refetch_after_write() {
    let store = store();

    let fetched = store
        .send_and_wait_for(
            SyncAction::Mutate { id: 7 },
            |action| matches!(action, SyncAction::Fetched { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(fetched, SyncAction::Fetched { generation: 1 });
    let (written, applied) = store.state(|s| (s.written.clone(), s.applied.clone())).await;
    assert_eq!(written, vec![7]);
    assert_eq!(applied, vec![1]);
}

#[tokio::test]
async fn test_wait_for_times_out_without_answer() {
    let store = store();

    let result = store
        .send_and_wait_for(
            SyncAction::Hang,
            |action| matches!(action, SyncAction::Fetched { .. }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn test_overlapping_refreshes_apply_only_latest() {
    let store = store();

    store.send(SyncAction::Refresh).await.unwrap();
    store.send(SyncAction::Refresh).await.unwrap();
    store.send(SyncAction::Refresh).await.unwrap();
    store.wait_until_idle(Duration::from_secs(1)).await.unwrap();

    assert_eq!(store.state(|s| s.applied.clone()).await, vec![3]);
}

#[tokio::test]
async fn test_subscribers_see_feedback_in_order() {
    let store = store();
    let mut rx = store.subscribe_actions();

    store.send(SyncAction::Mutate { id: 1 }).await.unwrap();
    store.wait_until_idle(Duration::from_secs(1)).await.unwrap();

    assert_eq!(rx.recv().await.unwrap(), SyncAction::Written { id: 1 });
    assert_eq!(rx.recv().await.unwrap(), SyncAction::Fetched { generation: 1 });
}

#[tokio::test]
async fn test_sent_actions_are_not_broadcast() {
    let store = store();
    let mut rx = store.subscribe_actions();

    store.send(SyncAction::Hang).await.unwrap();
    store.wait_until_idle(Duration::from_secs(1)).await.unwrap();

    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn test_concurrent_waiters_get_their_own_answer() {
    let store = Arc::new(store());

    let mut handles = Vec::new();
    for id in 1..=4 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    SyncAction::Mutate { id },
                    move |action| matches!(action, SyncAction::Written { id: written } if *written == id),
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    for (id, handle) in (1..=4).zip(handles) {
        assert_eq!(handle.await.unwrap().unwrap(), SyncAction::Written { id });
    }
    store.wait_until_idle(Duration::from_secs(1)).await.unwrap();

    let mut written = store.state(|s| s.written.clone()).await;
    written.sort_unstable();
    assert_eq!(written, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_lagging_subscriber_does_not_block_store() {
    let store = Store::with_broadcast_capacity(SyncState::default(), SyncReducer, SyncEnv, 4);
    let mut rx = store.subscribe_actions();

    for _ in 0..20 {
        store.send(SyncAction::Ping).await.unwrap();
    }
    store.wait_until_idle(Duration::from_secs(1)).await.unwrap();

    assert_eq!(store.state(|s| s.pings).await, 20);
    assert!(matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_))
    ));
}

#[tokio::test]
async fn test_shutdown_waits_for_in_flight_fetch() {
    let store = store();
    store.send(SyncAction::Refresh).await.unwrap();
    assert_eq!(store.pending_effects(), 1);

    store.shutdown(Duration::from_secs(1)).await.unwrap();

    assert_eq!(store.pending_effects(), 0);
    // The late answer arrives after shutdown began and is dropped.
    assert!(store.state(|s| s.applied.is_empty()).await);
}
