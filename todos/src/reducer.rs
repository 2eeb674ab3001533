//! Reducer logic for the todo application.
//!
//! Three reducers, composed by field:
//! - [`TodosReducer`] owns the ordered collection and delegates per-item
//!   logic to the entity-level [`reduce_todo`]
//! - [`VisibilityReducer`] owns the current filter
//! - [`app_reducer`] scopes both onto [`AppState`] and combines them into
//!   the root reducer the store runs
//!
//! Every reducer is total over the action vocabulary: an action that does
//! not concern a reducer's slice leaves that slice untouched.

use unistore_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use unistore_core::reducer::Reducer;

use crate::types::{AppState, Todo, TodoAction, TodoError, VisibilityFilter};

/// Dependencies injected into the todo reducers
///
/// The reducers are fully pure; ids are assigned when actions are
/// constructed (see [`TodoAction::add`]). The environment is kept as the
/// seam where future dependencies would enter.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoEnvironment;

/// Entity-level reducer: one todo item against one action
///
/// A `ToggleTodo` with a matching id flips `completed`; every other action,
/// and a toggle for a different id, leaves the item untouched. Creation has
/// no prior item to reduce and materializes as [`Todo::new`] in the
/// collection reducer instead.
fn reduce_todo(todo: &mut Todo, action: &TodoAction) {
    if let TodoAction::ToggleTodo { id } = action {
        if todo.id == *id {
            todo.completed = !todo.completed;
        }
    }
}

/// Reducer for the ordered todo collection
///
/// - `AddTodo` validates id uniqueness and appends at the end; existing
///   elements keep their positions.
/// - `ToggleTodo` applies [`reduce_todo`] to every element; non-matching
///   elements are untouched.
/// - Anything else is a no-op on this slice.
#[derive(Clone, Copy, Debug, Default)]
pub struct TodosReducer;

impl TodosReducer {
    /// Creates a new `TodosReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodosReducer {
    type State = Vec<Todo>;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Error = TodoError;

    fn reduce(
        &self,
        todos: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Result<(), Self::Error> {
        match action {
            TodoAction::AddTodo { id, text } => {
                if todos.iter().any(|t| t.id == id) {
                    return Err(TodoError::DuplicateId(id));
                }
                todos.push(Todo::new(id, text));
                Ok(())
            }
            TodoAction::ToggleTodo { .. } => {
                for todo in todos.iter_mut() {
                    reduce_todo(todo, &action);
                }
                Ok(())
            }
            TodoAction::SetVisibilityFilter { .. } => Ok(()),
        }
    }
}

/// Reducer for the visibility filter
///
/// `SetVisibilityFilter` replaces the filter verbatim; everything else is a
/// no-op on this slice. Invalid filter values are unrepresentable in
/// [`VisibilityFilter`], so this reducer cannot fail — validation lives
/// where filter strings enter the system (`FromStr`, serde).
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibilityReducer;

impl VisibilityReducer {
    /// Creates a new `VisibilityReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for VisibilityReducer {
    type State = VisibilityFilter;
    type Action = TodoAction;
    type Environment = TodoEnvironment;
    type Error = TodoError;

    fn reduce(
        &self,
        filter: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> Result<(), Self::Error> {
        if let TodoAction::SetVisibilityFilter { filter: next } = action {
            *filter = next;
        }
        Ok(())
    }
}

/// The root reducer type over [`AppState`]
pub type AppReducer = CombinedReducer<AppState, TodoAction, TodoEnvironment, TodoError>;

/// Builds the root reducer: collection and filter reducers, each scoped to
/// its own field of [`AppState`]
///
/// Composition is field-independent: neither sub-reducer ever sees the
/// other's slice.
#[must_use]
pub fn app_reducer() -> AppReducer {
    combine_reducers(vec![
        Box::new(scope_reducer(
            TodosReducer::new(),
            |state: &AppState| &state.todos,
            |state: &mut AppState, todos: Vec<Todo>| state.todos = todos,
        )),
        Box::new(scope_reducer(
            VisibilityReducer::new(),
            |state: &AppState| &state.visibility_filter,
            |state: &mut AppState, filter: VisibilityFilter| state.visibility_filter = filter,
        )),
    ])
}
