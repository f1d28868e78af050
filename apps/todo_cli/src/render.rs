//! Plain-text rendering of the store state.

use client_core::{StoreMode, LOCAL_MODE_NOTICE};
use shared::domain::TodoItem;

pub fn render(todos: &[TodoItem], mode: StoreMode) -> String {
    let mut out = String::new();
    if mode == StoreMode::Local {
        out.push_str(&format!("! {LOCAL_MODE_NOTICE}\n"));
    }
    if todos.is_empty() {
        out.push_str("(no todos)\n");
    }
    for (index, todo) in todos.iter().enumerate() {
        out.push_str(&format!("{}) #{} {}\n", index + 1, todo.id, todo.content));
    }
    out
}
