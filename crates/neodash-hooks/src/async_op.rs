//! Lifecycle wrapper for a single asynchronous action.
//!
//! # Design
//! - State is one enum, so data and error can only exist alongside the
//!   matching status and the derived flags cannot disagree with it.
//! - `execute` moves to `Pending` synchronously, before the returned future is
//!   first polled; observers see the transition immediately.
//! - Calls are never cancelled. Overlapping calls race to write the final
//!   state; [`CompletionPolicy`] decides whether stale completions may win.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;

use crate::subscription::{Listeners, Subscription};

/// Discriminant of an [`AsyncState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AsyncStatus {
    /// Never executed.
    Idle,
    /// An execution is in flight.
    Pending,
    /// Last completion succeeded.
    Success,
    /// Last completion failed.
    Error,
}

impl AsyncStatus {
    /// Lowercase label used in logs and CSS hooks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AsyncStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Observable state of an [`AsyncOperation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AsyncState<T, E> {
    /// Never executed.
    Idle,
    /// An execution is in flight; previous data and error are cleared.
    Pending,
    /// Value produced by the last completion.
    Success(T),
    /// Failure produced by the last completion.
    Error(E),
}

impl<T, E> AsyncState<T, E> {
    /// Status discriminant.
    #[must_use]
    pub const fn status(&self) -> AsyncStatus {
        match self {
            Self::Idle => AsyncStatus::Idle,
            Self::Pending => AsyncStatus::Pending,
            Self::Success(_) => AsyncStatus::Success,
            Self::Error(_) => AsyncStatus::Error,
        }
    }

    /// Value, present only on success.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Failure, present only on error.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// `status == Pending`.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// `status == Success`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// `status == Error`.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl<T, E> Default for AsyncState<T, E> {
    fn default() -> Self {
        Self::Idle
    }
}

/// What happens when an older execution finishes after a newer one started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Whichever execution completes last writes the state, even if it was
    /// started first. Matches an unguarded `execute`.
    #[default]
    LastWriteWins,
    /// Only the most recently started execution may write the state; stale
    /// completions are still returned to their own caller.
    LatestCallWins,
}

/// Executor hook for fire-and-forget executions (`immediate` mode).
pub trait LocalSpawner {
    /// Run `task` to completion on the current thread.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

impl<F> LocalSpawner for F
where
    F: Fn(LocalBoxFuture<'static, ()>),
{
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self(task);
    }
}

type Action<A, T, E> = Rc<dyn Fn(A) -> LocalBoxFuture<'static, Result<T, E>>>;

struct Shared<T, E> {
    state: RefCell<AsyncState<T, E>>,
    generation: Cell<u64>,
    observers: Listeners<AsyncState<T, E>>,
}

impl<T: Clone + 'static, E: Clone + 'static> Shared<T, E> {
    fn transition(&self, next: AsyncState<T, E>) {
        self.state.replace(next.clone());
        self.observers.notify(&next);
    }
}

/// Handle around one logical asynchronous action, called with arguments `A`.
///
/// Clones share state, so a clone handed to a callback observes and drives
/// the same lifecycle.
pub struct AsyncOperation<A, T, E> {
    action: Action<A, T, E>,
    initial_args: A,
    policy: CompletionPolicy,
    shared: Rc<Shared<T, E>>,
}

impl<A, T, E> AsyncOperation<A, T, E>
where
    A: Clone + 'static,
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Idle handle around `action`; `initial_args` are used by [`AsyncOperation::execute`].
    pub fn new<F, Fut>(action: F, initial_args: A) -> Self
    where
        F: Fn(A) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        let action: Action<A, T, E> =
            Rc::new(move |args: A| -> LocalBoxFuture<'static, Result<T, E>> { Box::pin(action(args)) });
        Self {
            action,
            initial_args,
            policy: CompletionPolicy::default(),
            shared: Rc::new(Shared {
                state: RefCell::new(AsyncState::Idle),
                generation: Cell::new(0),
                observers: Listeners::new(),
            }),
        }
    }

    /// Build a handle and, when `immediate`, start one execution with
    /// `initial_args` on `spawner` right away.
    pub fn create<F, Fut, Sp>(action: F, immediate: bool, initial_args: A, spawner: &Sp) -> Self
    where
        F: Fn(A) -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
        Sp: LocalSpawner + ?Sized,
        E: fmt::Debug,
    {
        let operation = Self::new(action, initial_args);
        if immediate {
            operation.spawn(spawner);
        }
        operation
    }

    /// Choose how overlapping executions resolve.
    #[must_use]
    pub fn with_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active completion policy.
    #[must_use]
    pub const fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AsyncState<T, E> {
        self.shared.state.borrow().clone()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> AsyncStatus {
        self.shared.state.borrow().status()
    }

    /// Value of the last successful completion, if the state is `Success`.
    #[must_use]
    pub fn data(&self) -> Option<T> {
        self.shared.state.borrow().data().cloned()
    }

    /// Failure of the last completion, if the state is `Error`.
    #[must_use]
    pub fn error(&self) -> Option<E> {
        self.shared.state.borrow().error().cloned()
    }

    /// `status == Pending`.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    /// `status == Success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.shared.state.borrow().is_success()
    }

    /// `status == Error`.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.shared.state.borrow().is_error()
    }

    /// Run `observer` on every state transition.
    pub fn observe(&self, observer: impl Fn(&AsyncState<T, E>) + 'static) -> Subscription {
        self.shared.observers.add(observer)
    }

    /// Execute with the arguments captured at construction.
    pub fn execute(&self) -> LocalBoxFuture<'static, Result<T, E>> {
        self.execute_with(self.initial_args.clone())
    }

    /// Execute with fresh arguments.
    ///
    /// The state is `Pending` as soon as this returns. The future resolves to
    /// the action's result; a failure is both stored and returned.
    pub fn execute_with(&self, args: A) -> LocalBoxFuture<'static, Result<T, E>> {
        let generation = self.shared.generation.get().wrapping_add(1);
        self.shared.generation.set(generation);
        self.shared.transition(AsyncState::Pending);

        let pending = (self.action)(args);
        let shared = Rc::clone(&self.shared);
        let policy = self.policy;
        Box::pin(async move {
            let result = pending.await;
            let latest = shared.generation.get();
            if policy == CompletionPolicy::LatestCallWins && latest != generation {
                tracing::debug!(generation, latest, "discarding stale completion");
                return result;
            }
            match &result {
                Ok(value) => shared.transition(AsyncState::Success(value.clone())),
                Err(err) => shared.transition(AsyncState::Error(err.clone())),
            }
            result
        })
    }

    /// Start [`AsyncOperation::execute`] on `spawner` without awaiting it.
    ///
    /// The failure has no caller to return to, so it is logged; it is still
    /// recorded in the state.
    pub fn spawn<Sp>(&self, spawner: &Sp)
    where
        Sp: LocalSpawner + ?Sized,
        E: fmt::Debug,
    {
        let execution = self.execute();
        spawner.spawn_local(Box::pin(async move {
            if let Err(err) = execution.await {
                tracing::warn!(error = ?err, "background execution failed");
            }
        }));
    }
}

impl<A: Clone, T, E> Clone for AsyncOperation<A, T, E> {
    fn clone(&self) -> Self {
        Self {
            action: Rc::clone(&self.action),
            initial_args: self.initial_args.clone(),
            policy: self.policy,
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<A, T: fmt::Debug, E: fmt::Debug> fmt::Debug for AsyncOperation<A, T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AsyncOperation")
            .field("state", &*self.shared.state.borrow())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    type Gates = Rc<RefCell<VecDeque<oneshot::Receiver<Result<u32, String>>>>>;

    /// Action whose completions are released by the test, in call order.
    fn gated() -> (AsyncOperation<(), u32, String>, Gates) {
        let gates: Gates = Rc::new(RefCell::new(VecDeque::new()));
        let action = {
            let gates = Rc::clone(&gates);
            move |(): ()| {
                let gate = gates.borrow_mut().pop_front();
                async move {
                    match gate {
                        Some(gate) => gate.await.unwrap_or_else(|_| Err("gate dropped".to_string())),
                        None => Err("no gate".to_string()),
                    }
                }
            }
        };
        (AsyncOperation::new(action, ()), gates)
    }

    fn open_gate(gates: &Gates) -> oneshot::Sender<Result<u32, String>> {
        let (tx, rx) = oneshot::channel();
        gates.borrow_mut().push_back(rx);
        tx
    }

    #[tokio::test]
    async fn execute_is_pending_before_first_poll() -> anyhow::Result<()> {
        let (op, gates) = gated();
        assert_eq!(op.status(), AsyncStatus::Idle);

        let tx = open_gate(&gates);
        let running = op.execute();
        assert!(op.is_loading());
        assert_eq!(op.data(), None);
        assert_eq!(op.error(), None);

        tx.send(Ok(5)).map_err(|_| anyhow::anyhow!("receiver gone"))?;
        assert_eq!(running.await, Ok(5));
        assert_eq!(op.state(), AsyncState::Success(5));
        Ok(())
    }

    #[tokio::test]
    async fn failure_is_stored_and_returned() {
        let op = AsyncOperation::new(|code: u16| async move { Err::<(), _>(format!("status {code}")) }, 500);

        let result = op.execute().await;

        assert_eq!(result, Err("status 500".to_string()));
        assert_eq!(op.state(), AsyncState::Error("status 500".to_string()));
        assert!(op.is_error());
        assert_eq!(op.data(), None);
    }

    #[tokio::test]
    async fn reexecution_clears_previous_outcome() {
        let op = AsyncOperation::new(
            |n: i32| async move { if n < 0 { Err("negative") } else { Ok(n * 2) } },
            1,
        );

        assert_eq!(op.execute().await, Ok(2));
        let again = op.execute_with(-1);
        assert_eq!(op.state(), AsyncState::Pending);
        assert_eq!(again.await, Err("negative"));
        assert_eq!(op.error(), Some("negative"));
        assert_eq!(op.data(), None);

        assert_eq!(op.execute_with(4).await, Ok(8));
        assert_eq!(op.error(), None);
    }

    #[tokio::test]
    async fn derived_flags_agree_with_status_on_every_transition() {
        let op = AsyncOperation::new(
            |fail: bool| async move { if fail { Err(()) } else { Ok("ok") } },
            false,
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = Rc::clone(&seen);
            op.observe(move |state| {
                seen.borrow_mut().push((
                    state.status(),
                    state.is_loading(),
                    state.is_success(),
                    state.is_error(),
                ));
            })
        };

        let _ = op.execute().await;
        let _ = op.execute_with(true).await;

        for (status, loading, success, error) in seen.borrow().iter().copied() {
            assert_eq!(loading, status == AsyncStatus::Pending);
            assert_eq!(success, status == AsyncStatus::Success);
            assert_eq!(error, status == AsyncStatus::Error);
        }
        let statuses: Vec<AsyncStatus> = seen.borrow().iter().map(|entry| entry.0).collect();
        assert_eq!(
            statuses,
            vec![
                AsyncStatus::Pending,
                AsyncStatus::Success,
                AsyncStatus::Pending,
                AsyncStatus::Error
            ]
        );
    }

    #[tokio::test]
    async fn overlapping_calls_let_the_last_completion_win_by_default() -> anyhow::Result<()> {
        let (op, gates) = gated();
        let first_gate = open_gate(&gates);
        let second_gate = open_gate(&gates);
        let first = op.execute();
        let second = op.execute();

        second_gate.send(Ok(2)).map_err(|_| anyhow::anyhow!("receiver gone"))?;
        assert_eq!(second.await, Ok(2));
        first_gate.send(Ok(1)).map_err(|_| anyhow::anyhow!("receiver gone"))?;
        assert_eq!(first.await, Ok(1));

        assert_eq!(op.data(), Some(1));
        Ok(())
    }

    #[tokio::test]
    async fn latest_call_policy_discards_stale_completions() -> anyhow::Result<()> {
        let (op, gates) = gated();
        let op = op.with_policy(CompletionPolicy::LatestCallWins);
        let first_gate = open_gate(&gates);
        let second_gate = open_gate(&gates);
        let first = op.execute();
        let second = op.execute();

        second_gate.send(Ok(2)).map_err(|_| anyhow::anyhow!("receiver gone"))?;
        assert_eq!(second.await, Ok(2));
        first_gate.send(Err("late".to_string())).map_err(|_| anyhow::anyhow!("receiver gone"))?;
        assert_eq!(first.await, Err("late".to_string()));

        assert_eq!(op.state(), AsyncState::Success(2));
        Ok(())
    }

    #[tokio::test]
    async fn immediate_creation_starts_pending_and_completes() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let spawner = |task: LocalBoxFuture<'static, ()>| {
                    tokio::task::spawn_local(task);
                };
                let op = AsyncOperation::create(|n: u8| async move { Ok::<_, ()>(n + 1) }, true, 9, &spawner);
                assert!(op.is_loading());

                let idle = AsyncOperation::create(|n: u8| async move { Ok::<_, ()>(n) }, false, 9, &spawner);
                assert_eq!(idle.status(), AsyncStatus::Idle);

                tokio::task::yield_now().await;
                assert_eq!(op.data(), Some(10));
            })
            .await;
    }

    #[test]
    fn clones_share_state() {
        let op = AsyncOperation::new(|(): ()| async { Ok::<u8, ()>(1) }, ());
        let clone = op.clone();
        drop(clone.execute());
        assert!(op.is_loading());
        assert_eq!(op.policy(), CompletionPolicy::LastWriteWins);
    }
}
