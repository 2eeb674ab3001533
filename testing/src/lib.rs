//! # Unistore Testing
//!
//! Testing utilities and helpers for the unistore architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - `ReducerTest`, a fluent Given/When/Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use unistore_testing::ReducerTest;
//!
//! ReducerTest::new(TodosReducer)
//!     .with_env(TodoEnvironment::default())
//!     .given_state(Vec::new())
//!     .when_action(TodoAction::AddTodo { id, text })
//!     .then_state(|todos| assert_eq!(todos.len(), 1))
//!     .run();
//! ```


/// Mock implementations for testing.
pub mod mocks {
    use std::cell::Cell;

    use unistore_core::environment::IdGenerator;

    /// Id generator that always yields the same id
    ///
    /// Useful for forcing id collisions deterministically, e.g. when testing
    /// duplicate-id validation.
    ///
    /// # Example
    ///
    /// ```
    /// use unistore_core::environment::IdGenerator;
    /// use unistore_testing::mocks::FixedIdGenerator;
    ///
    /// let ids = FixedIdGenerator::new(7);
    /// assert_eq!(ids.next_id(), 7);
    /// assert_eq!(ids.next_id(), 7); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedIdGenerator {
        id: u64,
    }

    impl FixedIdGenerator {
        /// Create a generator pinned to `id`
        #[must_use]
        pub const fn new(id: u64) -> Self {
            Self { id }
        }
    }

    impl IdGenerator for FixedIdGenerator {
        fn next_id(&self) -> u64 {
            self.id
        }
    }

    /// Id generator that replays a scripted sequence
    ///
    /// Yields the scripted ids in order, then keeps counting up from the
    /// last one. Lets a test pin exactly which ids a scenario will see.
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        script: Vec<u64>,
        cursor: Cell<usize>,
        overflow: Cell<u64>,
    }

    impl ScriptedIdGenerator {
        /// Create a generator that yields `script` in order
        #[must_use]
        pub fn new(script: Vec<u64>) -> Self {
            let overflow = script.last().map_or(0, |last| last + 1);
            Self {
                script,
                cursor: Cell::new(0),
                overflow: Cell::new(overflow),
            }
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn next_id(&self) -> u64 {
            let cursor = self.cursor.get();
            if let Some(&id) = self.script.get(cursor) {
                self.cursor.set(cursor + 1);
                id
            } else {
                let id = self.overflow.get();
                self.overflow.set(id + 1);
                id
            }
        }
    }
}

// Re-export commonly used items
pub use mocks::FixedIdGenerator;
pub use reducer_test::ReducerTest;
