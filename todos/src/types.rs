//! Domain types for the todo list.
//!
//! The data model is deliberately small: a todo is an id, a text, and a
//! completed flag; the application state is the ordered todo collection plus
//! the current visibility filter. Everything here is owned data with serde
//! derives pinning the wire contract (`type`-tagged actions with
//! SCREAMING_SNAKE_CASE names).

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a todo item
///
/// Ids are assigned by an external [`IdGenerator`]
/// (`unistore_core::environment::IdGenerator`) when the creating action is
/// constructed; the reducer core never generates ids itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its integer value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the integer value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Text of the todo
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl Todo {
    /// Creates a new, not-yet-completed todo
    #[must_use]
    pub const fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// The currently selected subset-of-todos display mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisibilityFilter {
    /// Show every todo
    #[default]
    ShowAll,
    /// Show only todos that are not completed
    ShowActive,
    /// Show only completed todos
    ShowCompleted,
}

impl VisibilityFilter {
    /// The wire spelling of this filter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShowAll => "SHOW_ALL",
            Self::ShowActive => "SHOW_ACTIVE",
            Self::ShowCompleted => "SHOW_COMPLETED",
        }
    }
}

impl std::fmt::Display for VisibilityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisibilityFilter {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHOW_ALL" => Ok(Self::ShowAll),
            "SHOW_ACTIVE" => Ok(Self::ShowActive),
            "SHOW_COMPLETED" => Ok(Self::ShowCompleted),
            other => Err(TodoError::InvalidFilter(other.to_string())),
        }
    }
}

/// The single source of truth for the todo application
///
/// Replaced wholesale on every committed transition; no other mutable state
/// exists in the core.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// All todos, in insertion order
    pub todos: Vec<Todo>,
    /// The current visibility filter
    pub visibility_filter: VisibilityFilter,
}

impl AppState {
    /// Creates an empty state with the default filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns a todo by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Checks whether a todo with this id exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }
}

/// The closed set of update commands the system accepts
///
/// Actions are immutable once constructed; reducers never modify them. The
/// serde representation is the wire contract: a `type` tag plus the fields
/// of the variant, e.g. `{"type":"ADD_TODO","id":0,"text":"Go shopping"}`.
/// Unknown `type` tags fail deserialization — there is no such thing as an
/// unrecognized action inside the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoAction {
    /// Append a new todo with `completed = false`
    AddTodo {
        /// Identifier supplied by the external generator
        id: TodoId,
        /// Text of the new todo
        text: String,
    },

    /// Flip `completed` on the matching todo
    ToggleTodo {
        /// Identifier of the todo to flip
        id: TodoId,
    },

    /// Replace the visibility filter
    SetVisibilityFilter {
        /// The filter to select
        filter: VisibilityFilter,
    },
}

impl TodoAction {
    /// Build an `AddTodo` action, drawing the id from `ids`
    ///
    /// Id assignment happens here, at action construction, so the reducers
    /// stay free of hidden counters.
    pub fn add(ids: &dyn unistore_core::environment::IdGenerator, text: impl Into<String>) -> Self {
        Self::AddTodo {
            id: TodoId::new(ids.next_id()),
            text: text.into(),
        }
    }

    /// Build a `ToggleTodo` action
    #[must_use]
    pub const fn toggle(id: TodoId) -> Self {
        Self::ToggleTodo { id }
    }

    /// Build a `SetVisibilityFilter` action
    #[must_use]
    pub const fn set_filter(filter: VisibilityFilter) -> Self {
        Self::SetVisibilityFilter { filter }
    }
}

/// Validation errors for the todo domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// An `AddTodo` carried an id that is already in the collection
    ///
    /// Ids are unique within the collection at all times; a generator that
    /// repeats ids is a bug worth surfacing, not papering over.
    #[error("todo {0} already exists")]
    DuplicateId(TodoId),

    /// A filter string from outside was not one of the three known values
    #[error("unrecognized visibility filter: {0}")]
    InvalidFilter(String),
}

#[cfg(test)]
mod tests {
    use unistore_core::environment::SequentialIdGenerator;

    use super::*;

    #[test]
    fn todo_new_starts_active() {
        let todo = Todo::new(TodoId::new(3), "Water plants".to_string());
        assert_eq!(todo.id, TodoId::new(3));
        assert_eq!(todo.text, "Water plants");
        assert!(!todo.completed);
    }

    #[test]
    fn default_state_is_empty_show_all() {
        let state = AppState::new();
        assert_eq!(state.count(), 0);
        assert_eq!(state.visibility_filter, VisibilityFilter::ShowAll);
    }

    #[test]
    fn state_lookup_helpers() {
        let mut state = AppState::new();
        state.todos.push(Todo::new(TodoId::new(0), "a".to_string()));
        state.todos.push(Todo {
            id: TodoId::new(1),
            text: "b".to_string(),
            completed: true,
        });

        assert_eq!(state.count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert!(state.exists(TodoId::new(1)));
        assert!(!state.exists(TodoId::new(2)));
        assert_eq!(state.get(TodoId::new(0)).map(|t| t.text.as_str()), Some("a"));
    }

    #[test]
    fn add_constructor_draws_from_generator() {
        let ids = SequentialIdGenerator::new();

        let first = TodoAction::add(&ids, "one");
        let second = TodoAction::add(&ids, "two");

        assert_eq!(
            first,
            TodoAction::AddTodo {
                id: TodoId::new(0),
                text: "one".to_string(),
            }
        );
        assert_eq!(
            second,
            TodoAction::AddTodo {
                id: TodoId::new(1),
                text: "two".to_string(),
            }
        );
    }

    #[test]
    fn action_wire_format_round_trips() {
        let action: TodoAction =
            serde_json::from_str(r#"{"type":"ADD_TODO","id":0,"text":"Go shopping"}"#)
                .unwrap();
        assert_eq!(
            action,
            TodoAction::AddTodo {
                id: TodoId::new(0),
                text: "Go shopping".to_string(),
            }
        );

        let toggle: TodoAction = serde_json::from_str(r#"{"type":"TOGGLE_TODO","id":1}"#).unwrap();
        assert_eq!(toggle, TodoAction::toggle(TodoId::new(1)));

        let set: TodoAction =
            serde_json::from_str(r#"{"type":"SET_VISIBILITY_FILTER","filter":"SHOW_ACTIVE"}"#)
                .unwrap();
        assert_eq!(
            set,
            TodoAction::set_filter(VisibilityFilter::ShowActive)
        );

        let json = serde_json::to_value(&toggle).unwrap();
        assert_eq!(json["type"], "TOGGLE_TODO");
        assert_eq!(json["id"], 1);
    }

    #[test]
    fn unknown_action_type_is_rejected_at_the_wire() {
        let result: Result<TodoAction, _> =
            serde_json::from_str(r#"{"type":"REMOVE_TODO","id":0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_filter_value_is_rejected_at_the_wire() {
        let result: Result<TodoAction, _> =
            serde_json::from_str(r#"{"type":"SET_VISIBILITY_FILTER","filter":"SHOW_SOME"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn filter_from_str_accepts_wire_spellings() {
        assert_eq!(
            "SHOW_ALL".parse::<VisibilityFilter>().unwrap(),
            VisibilityFilter::ShowAll
        );
        assert_eq!(
            "SHOW_ACTIVE".parse::<VisibilityFilter>().unwrap(),
            VisibilityFilter::ShowActive
        );
        assert_eq!(
            "SHOW_COMPLETED".parse::<VisibilityFilter>().unwrap(),
            VisibilityFilter::ShowCompleted
        );
    }

    #[test]
    fn filter_from_str_rejects_anything_else() {
        let err = "SHOW_SOME".parse::<VisibilityFilter>().unwrap_err();
        assert_eq!(err, TodoError::InvalidFilter("SHOW_SOME".to_string()));
    }

    #[test]
    fn filter_display_matches_wire_spelling() {
        assert_eq!(VisibilityFilter::ShowAll.to_string(), "SHOW_ALL");
        assert_eq!(VisibilityFilter::ShowCompleted.to_string(), "SHOW_COMPLETED");
    }

    #[test]
    fn state_serializes_with_camel_case_filter_key() {
        let json = serde_json::to_value(AppState::new()).unwrap();
        assert_eq!(json["visibilityFilter"], "SHOW_ALL");
        assert!(json["todos"].as_array().map(Vec::is_empty).unwrap_or(false));
    }
}
