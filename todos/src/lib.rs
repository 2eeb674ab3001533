//! Todo application built on the unistore architecture.
//!
//! This crate is the domain layer of the classic todo list: an ordered todo
//! collection plus a visibility filter, driven entirely by three actions
//! (`ADD_TODO`, `TOGGLE_TODO`, `SET_VISIBILITY_FILTER`) flowing one
//! direction through a composed reducer.
//!
//! It demonstrates:
//!
//! - A closed action vocabulary with a pinned JSON wire format
//! - Entity / collection / filter reducers composed by field with
//!   `scope_reducer` + `combine_reducers`
//! - A selector layer deriving the visible todos for a view
//! - Id assignment through an injected generator, never a hidden global
//!
//! # Quick Start
//!
//! ```
//! use todos::{AppState, TodoAction, TodoEnvironment, app_reducer, visible_todos_of};
//! use unistore_core::environment::SequentialIdGenerator;
//! use unistore_runtime::Store;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ids = SequentialIdGenerator::new();
//! let store = Store::new(AppState::default(), app_reducer(), TodoEnvironment);
//!
//! store.dispatch(TodoAction::add(&ids, "Water plants"))?;
//! store.dispatch(TodoAction::add(&ids, "Sharpen pencils"))?;
//!
//! let visible = store.state(|state| visible_todos_of(state));
//! assert_eq!(visible.len(), 2);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod reducer;
pub mod selector;
pub mod types;

// Re-export commonly used types
pub use reducer::{AppReducer, TodoEnvironment, TodosReducer, VisibilityReducer, app_reducer};
pub use selector::{visible_todos, visible_todos_of};
pub use types::{AppState, Todo, TodoAction, TodoError, TodoId, VisibilityFilter};
