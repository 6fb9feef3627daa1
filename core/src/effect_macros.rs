//! Declarative macros for ergonomic effect construction
//!
//! Remote calls in a reducer are almost always "run this future, map the
//! result into an action", so the macro removes the `Box::pin` noise.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use todoit_core::async_effect;
///
/// async_effect! {
///     match repository.list(&user_id).await {
///         Ok(todos) => Some(TodoAction::TodosLoaded { generation, identity, todos }),
///         Err(error) => Some(TodoAction::ReloadFailed { error: error.to_string() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
