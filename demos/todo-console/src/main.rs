//! Console render driver for the todo store.
//!
//! This binary is the "view framework" of the demo: it binds a console
//! renderer to the store through explicit props-mapping adapters (the
//! `state -> props` and `dispatch -> callbacks` pair), re-rendering on every
//! store notification. The subscription is scoped: it is released when the
//! view handle goes out of scope.

use todos::{
    AppState, TodoAction, TodoEnvironment, TodoId, VisibilityFilter, app_reducer, visible_todos_of,
};
use unistore_core::environment::SequentialIdGenerator;
use unistore_runtime::{Store, Subscription};

type TodoStore = Store<AppState, TodoAction, TodoEnvironment, todos::AppReducer>;

/// Props for one rendered todo row
struct TodoRow {
    id: TodoId,
    text: String,
    completed: bool,
}

/// Props for the todo list view, derived from state on every notification
struct TodoListProps {
    rows: Vec<TodoRow>,
}

/// Props for the footer showing the selected filter
struct FooterProps {
    current: VisibilityFilter,
}

/// `state -> props` adapter for the list view
fn todo_list_props(state: &AppState) -> TodoListProps {
    TodoListProps {
        rows: visible_todos_of(state)
            .into_iter()
            .map(|todo| TodoRow {
                id: todo.id,
                text: todo.text,
                completed: todo.completed,
            })
            .collect(),
    }
}

/// `state -> props` adapter for the footer
fn footer_props(state: &AppState) -> FooterProps {
    FooterProps {
        current: state.visibility_filter,
    }
}

/// `dispatch -> callbacks` adapter: the handlers a view hands to its widgets
///
/// Holds a cheap store handle; each callback turns a UI gesture into an
/// action and dispatches it. Dispatch failures are logged, never swallowed
/// silently.
struct ListCallbacks {
    store: TodoStore,
}

impl ListCallbacks {
    fn on_todo_click(&self, id: TodoId) {
        if let Err(error) = self.store.dispatch(TodoAction::toggle(id)) {
            tracing::error!(%error, %id, "toggle rejected");
        }
    }

    fn on_filter_click(&self, filter: VisibilityFilter) {
        if let Err(error) = self.store.dispatch(TodoAction::set_filter(filter)) {
            tracing::error!(%error, %filter, "filter change rejected");
        }
    }
}

fn render(list: &TodoListProps, footer: &FooterProps) {
    println!("--- todos ({}) ---", footer.current);
    for row in &list.rows {
        let mark = if row.completed { "x" } else { " " };
        println!("  [{}] #{} {}", mark, row.id, row.text);
    }
    if list.rows.is_empty() {
        println!("  (nothing to show)");
    }
}

/// Attach the console view: subscribe on attach, unsubscribe on detach
///
/// The returned subscription releases the registration when dropped, on
/// every exit path.
fn attach_console_view(store: &TodoStore) -> Subscription {
    store.subscribe(|state: &AppState| {
        render(&todo_list_props(state), &footer_props(state));
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ids = SequentialIdGenerator::new();
    let store: TodoStore = Store::new(AppState::default(), app_reducer(), TodoEnvironment);

    let view = attach_console_view(&store);
    let callbacks = ListCallbacks {
        store: store.clone(),
    };

    store.dispatch(TodoAction::add(&ids, "Water the plants"))?;
    store.dispatch(TodoAction::add(&ids, "Go shopping"))?;

    // Simulated gestures: complete the second todo, then narrow the view.
    callbacks.on_todo_click(TodoId::new(1));
    callbacks.on_filter_click(VisibilityFilter::ShowActive);
    callbacks.on_filter_click(VisibilityFilter::ShowCompleted);

    // Detach the view; further dispatches no longer render.
    view.cancel();
    store.dispatch(TodoAction::add(&ids, "Read a book"))?;

    let state = store.snapshot();
    println!(
        "final state: {} todos, {} completed, filter {}",
        state.count(),
        state.completed_count(),
        state.visibility_filter
    );

    Ok(())
}
