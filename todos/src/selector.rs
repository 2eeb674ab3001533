//! Selector layer: pure projections from state to what a view displays.

use crate::types::{AppState, Todo, VisibilityFilter};

/// Derives the visible subset of todos for a filter
///
/// Returns a new sequence (not a view), preserving input order:
/// - `ShowCompleted` keeps completed todos
/// - `ShowActive` keeps todos that are not completed
/// - `ShowAll` keeps everything
#[must_use]
pub fn visible_todos(todos: &[Todo], filter: VisibilityFilter) -> Vec<Todo> {
    match filter {
        VisibilityFilter::ShowCompleted => todos.iter().filter(|t| t.completed).cloned().collect(),
        VisibilityFilter::ShowActive => todos.iter().filter(|t| !t.completed).cloned().collect(),
        VisibilityFilter::ShowAll => todos.to_vec(),
    }
}

/// Convenience wrapper applying [`visible_todos`] to a whole [`AppState`]
#[must_use]
pub fn visible_todos_of(state: &AppState) -> Vec<Todo> {
    visible_todos(&state.todos, state.visibility_filter)
}
