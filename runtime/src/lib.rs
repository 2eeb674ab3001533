//! # Unistore Runtime
//!
//! Runtime implementation for the unistore architecture.
//!
//! This crate provides the Store: the single owner of current application
//! state and the gateway for all reads and writes to it.
//!
//! ## Core Components
//!
//! - **Store**: holds current state, applies the reducer to `(state, action)`
//!   and notifies subscribers after each committed transition
//! - **Subscription**: scoped registration of a notification callback
//! - **`DispatchError`**: the failure taxonomy of the dispatch boundary
//!
//! ## Execution model
//!
//! The store is single-threaded, cooperative, and run-to-completion:
//! `dispatch` reduces, commits, and notifies every subscriber before
//! returning to the caller. There is no suspension point anywhere in the
//! loop. A dispatch triggered from inside an active dispatch fails fast with
//! [`error::DispatchError::Reentrant`] rather than silently reordering
//! notifications.
//!
//! ## Example
//!
//! ```ignore
//! use unistore_runtime::Store;
//!
//! let store = Store::new(AppState::default(), app_reducer(), environment);
//!
//! let _sub = store.subscribe(|state: &AppState| render(state));
//! store.dispatch(Action::DoSomething)?;
//!
//! let value = store.state(|s| s.some_field.clone());
//! ```

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors surfaced by [`Store::dispatch`](crate::store::Store::dispatch)
    ///
    /// Dispatch is atomic: whenever it returns an error, the previous state
    /// is still in place and no subscriber has been notified.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum DispatchError<E> {
        /// Dispatch was called from inside an active dispatch
        ///
        /// Subscribers and reducers must not dispatch synchronously; doing
        /// so would corrupt the notification order. Defer the follow-up
        /// action until the current dispatch has returned.
        #[error("dispatch re-entered while an earlier dispatch was still running")]
        Reentrant,

        /// The reducer rejected the action
        ///
        /// Carries the reducer's validation error. The state was not
        /// replaced.
        #[error("action rejected: {0}")]
        Rejected(E),
    }
}

/// Store module - state ownership, dispatch, and subscriptions
pub mod store {
    use std::cell::{Cell, Ref, RefCell};
    use std::fmt::Debug;
    use std::marker::PhantomData;
    use std::rc::{Rc, Weak};

    use unistore_core::reducer::Reducer;

    use crate::error::DispatchError;

    type Callback<S> = Rc<RefCell<dyn FnMut(&S)>>;

    struct Subscriber<S> {
        id: u64,
        callback: Callback<S>,
    }

    struct StoreInner<S, E, R> {
        state: RefCell<S>,
        reducer: R,
        environment: E,
        subscribers: RefCell<Vec<Subscriber<S>>>,
        next_subscriber_id: Cell<u64>,
        dispatching: Cell<bool>,
    }

    /// The Store - single owner of current application state
    ///
    /// A `Store` value is a cheap handle over shared internals; cloning it
    /// yields another handle onto the same state and subscriber registry.
    /// Construct one explicitly and pass handles to whatever consumes it —
    /// there is no ambient global instance.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        inner: Rc<StoreInner<S, E, R>>,
        _actions: PhantomData<fn(A)>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone,
        A: Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (business logic)
        /// - `environment`: Injected dependencies
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                inner: Rc::new(StoreInner {
                    state: RefCell::new(initial_state),
                    reducer,
                    environment,
                    subscribers: RefCell::new(Vec::new()),
                    next_subscriber_id: Cell::new(0),
                    dispatching: Cell::new(false),
                }),
                _actions: PhantomData,
            }
        }

        /// Read the current state through a closure
        ///
        /// The closure borrows the state for the duration of the call;
        /// callers must treat it as read-only and must not dispatch from
        /// inside the closure.
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.inner.state.borrow())
        }

        /// Clone the current state
        ///
        /// The returned value is a consistent snapshot: it never changes,
        /// no matter how many actions are dispatched afterwards.
        #[must_use]
        pub fn snapshot(&self) -> S {
            self.inner.state.borrow().clone()
        }

        /// Dispatch an action through the reducer
        ///
        /// Computes the next state from the current one, commits it, then
        /// invokes every subscriber registered at notification time, in
        /// registration order, synchronously. Subscribers added or cancelled
        /// during the dispatch take effect on the next dispatch.
        ///
        /// The transition is atomic: the reducer runs on a copy of the
        /// state, and the copy is committed only on success.
        ///
        /// # Errors
        ///
        /// - [`DispatchError::Reentrant`] if called from inside an active
        ///   dispatch (e.g. from a subscriber callback). The in-flight
        ///   dispatch is unaffected.
        /// - [`DispatchError::Rejected`] if the reducer rejects the action.
        ///   The previous state remains in place and no subscriber is
        ///   notified.
        pub fn dispatch(&self, action: A) -> Result<(), DispatchError<R::Error>> {
            if self.inner.dispatching.replace(true) {
                tracing::warn!(action = ?action, "reentrant dispatch rejected");
                return Err(DispatchError::Reentrant);
            }
            let result = self.reduce_and_notify(action);
            self.inner.dispatching.set(false);
            result
        }

        fn reduce_and_notify(&self, action: A) -> Result<(), DispatchError<R::Error>> {
            tracing::debug!(action = ?action, "dispatching");

            let mut next = self.inner.state.borrow().clone();
            self.inner
                .reducer
                .reduce(&mut next, action, &self.inner.environment)
                .map_err(DispatchError::Rejected)?;
            self.inner.state.replace(next);

            self.notify_subscribers();
            Ok(())
        }

        fn notify_subscribers(&self) {
            // Snapshot the registry so subscribe/cancel from inside a
            // callback cannot change this notification round.
            let snapshot: Vec<Callback<S>> = self
                .inner
                .subscribers
                .borrow()
                .iter()
                .map(|s| Rc::clone(&s.callback))
                .collect();

            tracing::trace!(subscribers = snapshot.len(), "notifying subscribers");

            let state: Ref<'_, S> = self.inner.state.borrow();
            for callback in snapshot {
                (callback.borrow_mut())(&state);
            }
        }

        /// Register a callback invoked after every committed transition
        ///
        /// The callback receives a reference to the freshly committed state.
        /// It must not dispatch synchronously (see
        /// [`DispatchError::Reentrant`]).
        ///
        /// The returned [`Subscription`] removes the registration when
        /// cancelled or dropped; call [`Subscription::detach`] to keep the
        /// callback registered for the lifetime of the store.
        #[must_use = "dropping the subscription unsubscribes the callback"]
        pub fn subscribe<F>(&self, callback: F) -> Subscription
        where
            F: FnMut(&S) + 'static,
            S: 'static,
            E: 'static,
            R: 'static,
        {
            let id = self.inner.next_subscriber_id.get();
            self.inner.next_subscriber_id.set(id + 1);

            self.inner.subscribers.borrow_mut().push(Subscriber {
                id,
                callback: Rc::new(RefCell::new(callback)),
            });

            let inner: Weak<StoreInner<S, E, R>> = Rc::downgrade(&self.inner);
            Subscription {
                cancel: Some(Box::new(move || {
                    if let Some(inner) = inner.upgrade() {
                        inner.subscribers.borrow_mut().retain(|s| s.id != id);
                    }
                })),
            }
        }

        /// Number of currently registered subscribers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.inner.subscribers.borrow().len()
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                inner: Rc::clone(&self.inner),
                _actions: PhantomData,
            }
        }
    }

    /// Scoped registration of a store subscriber
    ///
    /// Acquired from [`Store::subscribe`]. The registration is released when
    /// the subscription is cancelled or dropped, on every exit path; a
    /// detached subscription stays registered for the store's lifetime.
    /// Cancellation after the store itself is gone is a no-op.
    pub struct Subscription {
        cancel: Option<Box<dyn FnOnce()>>,
    }

    impl Subscription {
        /// Remove the registration now
        ///
        /// Consumes the subscription, so a registration can only be removed
        /// once.
        pub fn cancel(mut self) {
            self.release();
        }

        /// Keep the callback registered for the lifetime of the store
        pub fn detach(mut self) {
            self.cancel = None;
        }

        fn release(&mut self) {
            if let Some(cancel) = self.cancel.take() {
                cancel();
            }
        }
    }

    impl Drop for Subscription {
        fn drop(&mut self) {
            self.release();
        }
    }

    impl std::fmt::Debug for Subscription {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Subscription")
                .field("active", &self.cancel.is_some())
                .finish()
        }
    }
}

pub use error::DispatchError;
pub use store::{Store, Subscription};

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use unistore_core::reducer::Reducer;

    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct TestState {
        count: i64,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Increment,
        SetCount(i64),
    }

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("count must be non-negative, got {0}")]
    struct NegativeCount(i64);

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();
        type Error = NegativeCount;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> Result<(), Self::Error> {
            match action {
                TestAction::Increment => {
                    state.count += 1;
                    Ok(())
                }
                TestAction::SetCount(count) => {
                    if count < 0 {
                        return Err(NegativeCount(count));
                    }
                    state.count = count;
                    Ok(())
                }
            }
        }
    }

    fn test_store() -> Store<TestState, TestAction, (), TestReducer> {
        Store::new(TestState::default(), TestReducer, ())
    }

    #[test]
    fn dispatch_commits_new_state() {
        let store = test_store();

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(store.state(|s| s.count), 1);

        store.dispatch(TestAction::SetCount(10)).unwrap();
        assert_eq!(store.state(|s| s.count), 10);
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let store = test_store();
        store.dispatch(TestAction::SetCount(5)).unwrap();

        let err = store.dispatch(TestAction::SetCount(-3)).unwrap_err();
        assert_eq!(err, DispatchError::Rejected(NegativeCount(-3)));
        assert_eq!(store.snapshot(), TestState { count: 5 });
    }

    #[test]
    fn rejected_action_notifies_nobody() {
        let store = test_store();
        let calls = Rc::new(RefCell::new(0_u32));

        let calls_in = Rc::clone(&calls);
        let _sub = store.subscribe(move |_state: &TestState| {
            *calls_in.borrow_mut() += 1;
        });

        let _ = store.dispatch(TestAction::SetCount(-1));
        assert_eq!(*calls.borrow(), 0);

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn subscribers_run_in_registration_order_exactly_once() {
        let store = test_store();
        let order = Rc::new(RefCell::new(Vec::new()));

        let order_a = Rc::clone(&order);
        let sub_a = store.subscribe(move |_state: &TestState| {
            order_a.borrow_mut().push("a");
        });

        let order_b = Rc::clone(&order);
        let _sub_b = store.subscribe(move |_state: &TestState| {
            order_b.borrow_mut().push("b");
        });

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(*order.borrow(), vec!["a", "b"]);

        sub_a.cancel();
        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(*order.borrow(), vec!["a", "b", "b"]);
    }

    #[test]
    fn subscriber_sees_committed_state() {
        let store = test_store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_in = Rc::clone(&seen);
        let _sub = store.subscribe(move |state: &TestState| {
            seen_in.borrow_mut().push(state.count);
        });

        store.dispatch(TestAction::Increment).unwrap();
        store.dispatch(TestAction::SetCount(7)).unwrap();
        assert_eq!(*seen.borrow(), vec![1, 7]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let store = test_store();

        {
            let _sub = store.subscribe(|_state: &TestState| {});
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn detached_subscription_stays_registered() {
        let store = test_store();

        store.subscribe(|_state: &TestState| {}).detach();
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn subscription_outliving_store_is_harmless() {
        let store = test_store();
        let sub = store.subscribe(|_state: &TestState| {});
        drop(store);
        sub.cancel();
    }

    #[test]
    fn subscribe_during_notification_waits_for_next_dispatch() {
        let store = test_store();
        let late_calls = Rc::new(RefCell::new(0_u32));

        let registrar = store.clone();
        let late_calls_in = Rc::clone(&late_calls);
        let _sub = store.subscribe(move |_state: &TestState| {
            let late_calls_new = Rc::clone(&late_calls_in);
            registrar
                .subscribe(move |_state: &TestState| {
                    *late_calls_new.borrow_mut() += 1;
                })
                .detach();
        });

        store.dispatch(TestAction::Increment).unwrap();
        // Registered mid-dispatch: not part of that notification round.
        assert_eq!(*late_calls.borrow(), 0);

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(*late_calls.borrow(), 1);
    }

    #[test]
    fn reentrant_dispatch_fails_fast() {
        let store = test_store();
        let observed = Rc::new(RefCell::new(None));

        let inner_store = store.clone();
        let observed_in = Rc::clone(&observed);
        let _sub = store.subscribe(move |_state: &TestState| {
            let result = inner_store.dispatch(TestAction::Increment);
            *observed_in.borrow_mut() = Some(result);
        });

        store.dispatch(TestAction::Increment).unwrap();
        assert_eq!(
            *observed.borrow(),
            Some(Err(DispatchError::Reentrant)),
        );
        // The outer dispatch committed exactly one increment.
        assert_eq!(store.state(|s| s.count), 1);

        // The guard is released once the outer dispatch returns.
        store.dispatch(TestAction::SetCount(3)).unwrap();
        assert_eq!(store.state(|s| s.count), 3);
    }

    #[test]
    fn cloned_handles_share_state_and_subscribers() {
        let store = test_store();
        let handle = store.clone();

        handle.dispatch(TestAction::Increment).unwrap();
        assert_eq!(store.state(|s| s.count), 1);

        let _sub = handle.subscribe(|_state: &TestState| {});
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn snapshot_is_immutable() {
        let store = test_store();
        store.dispatch(TestAction::SetCount(2)).unwrap();

        let before = store.snapshot();
        store.dispatch(TestAction::SetCount(99)).unwrap();

        assert_eq!(before, TestState { count: 2 });
        assert_eq!(store.snapshot(), TestState { count: 99 });
    }
}
