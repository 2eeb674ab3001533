//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on one field of a larger state
//!
//! Together they express the root-reducer pattern: each slice of a composite
//! state gets its own reducer, scoped to that slice, and the scoped reducers
//! are combined into one reducer over the whole state. A sub-reducer only
//! ever sees and writes its own slice, which is what lets slices be
//! developed, tested, and replaced independently.

use crate::reducer::Reducer;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer runs in sequence. The first rejection short-circuits and is
/// returned to the caller; reducers later in the list are not run. Callers
/// that need atomicity reduce a copy of the state and discard it on `Err`
/// (the store does exactly this).
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use unistore_core::composition::combine_reducers;
/// use unistore_core::reducer::Reducer;
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     count: i32,
///     label: String,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     Increment,
///     SetLabel(String),
/// }
///
/// struct CountReducer;
/// struct LabelReducer;
///
/// impl Reducer for CountReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///     type Error = Infallible;
///
///     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> Result<(), Infallible> {
///         if matches!(action, AppAction::Increment) {
///             state.count += 1;
///         }
///         Ok(())
///     }
/// }
///
/// impl Reducer for LabelReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///     type Error = Infallible;
///
///     fn reduce(&self, state: &mut AppState, action: AppAction, _env: &()) -> Result<(), Infallible> {
///         if let AppAction::SetLabel(label) = action {
///             state.label = label;
///         }
///         Ok(())
///     }
/// }
///
/// let combined = combine_reducers(vec![Box::new(CountReducer), Box::new(LabelReducer)]);
///
/// let mut state = AppState::default();
/// combined.reduce(&mut state, AppAction::Increment, &()).unwrap();
/// assert_eq!(state.count, 1);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E, Err>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E, Error = Err>>>,
) -> CombinedReducer<S, A, E, Err>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
    Err: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E, Err>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
    Err: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E, Error = Err>>>,
}

impl<S, A, E, Err> Reducer for CombinedReducer<S, A, E, Err>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
    Err: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;
    type Error = Err;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<(), Self::Error> {
        for reducer in &self.reducers {
            reducer.reduce(state, action.clone(), env)?;
        }
        Ok(())
    }
}

/// Scopes a reducer to operate on one field of a larger state.
///
/// This allows reducers written against a slice type to be reused within a
/// composite application state. The scoped reducer clones the slice out,
/// runs the child reducer on it, and writes it back only on success, so a
/// rejected action leaves the parent state untouched.
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use unistore_core::composition::scope_reducer;
/// use unistore_core::reducer::Reducer;
///
/// #[derive(Clone, Default)]
/// struct CounterState {
///     count: i32,
/// }
///
/// #[derive(Clone)]
/// enum CounterAction {
///     Increment,
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = CounterState;
///     type Action = CounterAction;
///     type Environment = ();
///     type Error = Infallible;
///
///     fn reduce(&self, state: &mut CounterState, action: CounterAction, _env: &()) -> Result<(), Infallible> {
///         match action {
///             CounterAction::Increment => state.count += 1,
///         }
///         Ok(())
///     }
/// }
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: CounterState,
///     other: String,
/// }
///
/// let scoped = scope_reducer(
///     CounterReducer,
///     |app: &AppState| &app.counter,
///     |app: &mut AppState, counter: CounterState| app.counter = counter,
/// );
///
/// let mut state = AppState::default();
/// scoped.reduce(&mut state, CounterAction::Increment, &()).unwrap();
/// assert_eq!(state.counter.count, 1);
/// assert_eq!(state.other, "");
/// ```
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on one field of a larger state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<(A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;
    type Error = R::Error;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Result<(), Self::Error> {
        let mut slice = (self.get_state)(state).clone();
        self.reducer.reduce(&mut slice, action, env)?;
        (self.set_state)(state, slice);
        Ok(())
    }
}
