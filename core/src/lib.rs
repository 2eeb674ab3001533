//! # Unistore Core
//!
//! Core traits and types for the unistore architecture.
//!
//! This crate provides the fundamental abstractions for building
//! unidirectional-data-flow systems using the Reducer pattern.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, owned by a single store
//! - **Action**: All possible inputs to a reducer, as one closed tagged union
//! - **Reducer**: Pure function `(State, Action, Environment) → Result<State>`
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Unidirectional Data Flow
//! - Single Source of Truth
//! - Pure reducers (no hidden I/O, no hidden globals)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use unistore_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Decrement,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!     type Error = std::convert::Infallible;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> Result<(), Self::Error> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!             CounterAction::Decrement => state.count -= 1,
//!         }
//!         Ok(())
//!     }
//! }
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};

/// Reducer composition utilities (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → Result<State>`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Error`: The validation error type surfaced to `dispatch` callers
    ///
    /// # Contract
    ///
    /// A reducer must be referentially transparent: the same state, action,
    /// and environment always produce the same outcome, and nothing outside
    /// `state` is written. Actions the reducer does not recognize must leave
    /// the state untouched and return `Ok(())`.
    ///
    /// On `Err`, the caller discards the state the reducer was handed; the
    /// store reduces a copy and commits only successful transitions, so a
    /// rejected action never leaves partially updated state behind.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The error type for rejected actions
        type Error;

        /// Reduce an action into a state transition
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to the state being transitioned
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Errors
        ///
        /// Returns the reducer's validation error when the action is
        /// rejected. The state handed to a failing call must be considered
        /// tainted and discarded by the caller.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<(), Self::Error>;
    }
}

/// Environment module - dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected via
/// the Environment parameter, so reducers and the code constructing actions
/// never reach for ambient globals.
pub mod environment {
    use std::cell::Cell;

    /// Supplies identifiers for newly created entities
    ///
    /// Identifier assignment is an input to the system, not something the
    /// reducer core does: whoever constructs a creation action asks the
    /// generator for the next id. The core trusts the generator to never
    /// repeat an id.
    ///
    /// # Examples
    ///
    /// ```
    /// use unistore_core::environment::{IdGenerator, SequentialIdGenerator};
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), 0);
    /// assert_eq!(ids.next_id(), 1);
    /// ```
    pub trait IdGenerator {
        /// Produce the next identifier
        fn next_id(&self) -> u64;
    }

    /// Monotonically increasing in-process counter
    ///
    /// The production `IdGenerator`: starts at zero (or a caller-chosen
    /// value) and never repeats within a process.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: Cell<u64>,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at zero
        #[must_use]
        pub const fn new() -> Self {
            Self { next: Cell::new(0) }
        }

        /// Create a generator starting at `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: Cell::new(first),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> u64 {
            let id = self.next.get();
            self.next.set(id + 1);
            id
        }
    }
}
