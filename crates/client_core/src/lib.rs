use std::sync::Arc;

use shared::{
    domain::{TodoId, TodoItem},
    protocol::CreateEndpoint,
};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

pub mod error;
pub mod transport;

pub use error::BackendError;
pub use transport::{HttpTodoBackend, TodoBackend};

/// Notice shown by front ends while the store runs in [`StoreMode::Local`].
pub const LOCAL_MODE_NOTICE: &str = "Unable to connect to server - running local mode";

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// The backend answered the last call; mutations go through it.
    Remote,
    /// The last backend call failed; mutations apply to the in-memory list.
    Local,
}

impl StoreMode {
    fn from_reachability(remote_available: bool) -> Self {
        if remote_available {
            Self::Remote
        } else {
            Self::Local
        }
    }
}

/// Change notifications for front ends, see [`TodoStore::subscribe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The list was replaced or edited; carries the new list.
    TodosChanged(Vec<TodoItem>),
    /// The store switched between remote and local mode.
    ModeChanged(StoreMode),
}

struct StoreState {
    todos: Vec<TodoItem>,
    remote_available: bool,
    draft: String,
}

/// Owns the todo list and the reachability flag, and degrades to local-only
/// edits while the backend is unreachable.
///
/// The state lock is never held across a backend call, so operations started
/// concurrently may complete in any order. A refresh that finishes last wins.
pub struct TodoStore {
    backend: Arc<dyn TodoBackend>,
    state: RwLock<StoreState>,
    events: broadcast::Sender<StoreEvent>,
}

impl TodoStore {
    pub fn new(backend: Arc<dyn TodoBackend>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            backend,
            state: RwLock::new(StoreState {
                todos: Vec::new(),
                remote_available: true,
                draft: String::new(),
            }),
            events,
        })
    }

    pub fn connect(
        base_url: &str,
        create_endpoint: CreateEndpoint,
    ) -> Result<Arc<Self>, BackendError> {
        let backend = HttpTodoBackend::new(base_url, create_endpoint)?;
        Ok(Self::new(Arc::new(backend)))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub async fn list(&self) -> Vec<TodoItem> {
        self.state.read().await.todos.clone()
    }

    pub async fn is_remote_available(&self) -> bool {
        self.state.read().await.remote_available
    }

    pub async fn mode(&self) -> StoreMode {
        StoreMode::from_reachability(self.is_remote_available().await)
    }

    pub async fn draft(&self) -> String {
        self.state.read().await.draft.clone()
    }

    pub async fn set_draft(&self, text: impl Into<String>) {
        self.state.write().await.draft = text.into();
    }

    /// Replaces the list with the backend's on success. On failure the list
    /// is kept and the store switches to local mode.
    pub async fn refresh(&self) {
        match self.backend.fetch_todos().await {
            Ok(todos) => {
                let mode_changed = {
                    let mut state = self.state.write().await;
                    state.todos = todos.clone();
                    let was_available = std::mem::replace(&mut state.remote_available, true);
                    !was_available
                };
                debug!(count = todos.len(), "todo list replaced from backend");
                let _ = self.events.send(StoreEvent::TodosChanged(todos));
                if mode_changed {
                    info!("backend reachable again; leaving local mode");
                    let _ = self
                        .events
                        .send(StoreEvent::ModeChanged(StoreMode::Remote));
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to refresh todos");
                self.mark_unreachable().await;
            }
        }
    }

    /// Adds the current draft.
    pub async fn submit(&self) {
        let content = self.draft().await;
        self.add(content).await;
    }

    /// Remote mode sends the create request and then refreshes, whether or
    /// not the request succeeded; the refresh decides the resulting mode.
    pub async fn add(&self, content: impl Into<String>) {
        let content = content.into();

        if self.is_remote_available().await {
            let created = self.backend.create_todo(&content).await;
            self.clear_draft().await;
            if let Err(err) = created {
                warn!(error = %err, "failed to create todo");
                self.mark_unreachable().await;
            }
            self.refresh().await;
            return;
        }

        let (id, todos) = {
            let mut state = self.state.write().await;
            let id = TodoId::next_local(&state.todos);
            state.todos.push(TodoItem::new(id, content));
            state.draft.clear();
            (id, state.todos.clone())
        };
        info!(todo_id = %id, "added todo locally");
        let _ = self.events.send(StoreEvent::TodosChanged(todos));
    }

    pub async fn remove(&self, id: TodoId) {
        if self.is_remote_available().await {
            if let Err(err) = self.backend.delete_todo(id).await {
                warn!(todo_id = %id, error = %err, "failed to delete todo");
                self.mark_unreachable().await;
            }
            self.refresh().await;
            return;
        }

        let todos = {
            let mut state = self.state.write().await;
            let Some(index) = state.todos.iter().position(|todo| todo.id == id) else {
                debug!(todo_id = %id, "no local todo to remove");
                return;
            };
            state.todos.remove(index);
            state.todos.clone()
        };
        info!(todo_id = %id, "removed todo locally");
        let _ = self.events.send(StoreEvent::TodosChanged(todos));
    }

    async fn clear_draft(&self) {
        self.state.write().await.draft.clear();
    }

    async fn mark_unreachable(&self) {
        let was_available = {
            let mut state = self.state.write().await;
            std::mem::replace(&mut state.remote_available, false)
        };
        if was_available {
            warn!("{LOCAL_MODE_NOTICE}");
            let _ = self.events.send(StoreEvent::ModeChanged(StoreMode::Local));
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
