use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use shared::{
    domain::{TodoId, TodoItem},
    error::ValidationErrorBody,
    protocol::{
        CreateEndpoint, NewTodoBody, TodoModelBody, CREATE_BODY_SEGMENT, CREATE_MODEL_SEGMENT,
        TODOS_SEGMENT,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::error::BackendError;

/// Remote side of the todo store.
#[async_trait]
pub trait TodoBackend: Send + Sync {
    async fn fetch_todos(&self) -> Result<Vec<TodoItem>, BackendError>;
    async fn create_todo(&self, content: &str) -> Result<(), BackendError>;
    async fn delete_todo(&self, id: TodoId) -> Result<(), BackendError>;
}

pub struct HttpTodoBackend {
    http: Client,
    base_url: Url,
    create_endpoint: CreateEndpoint,
}

impl HttpTodoBackend {
    pub fn new(base_url: &str, create_endpoint: CreateEndpoint) -> Result<Self, BackendError> {
        Self::with_client(Client::new(), base_url, create_endpoint)
    }

    pub fn with_client(
        http: Client,
        base_url: &str,
        create_endpoint: CreateEndpoint,
    ) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::NotABaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            create_endpoint,
        })
    }

    /// Appends percent-encoded segments to the base url, keeping any prefix
    /// path the base carries (`http://host/app` + `api` -> `/app/api`).
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            if let Some(validation) = ValidationErrorBody::parse(&body) {
                warn!(url = %url, detail = %validation.summary(), "backend rejected todo");
            }
        }
        Err(BackendError::Status {
            url: url.to_string(),
            status,
            body,
        })
    }
}

#[async_trait]
impl TodoBackend for HttpTodoBackend {
    async fn fetch_todos(&self) -> Result<Vec<TodoItem>, BackendError> {
        let url = self.endpoint(&[TODOS_SEGMENT]);
        let response = self.send(self.http.get(url.clone()), &url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| BackendError::Transport {
                url: url.to_string(),
                source,
            })?;
        let todos: Vec<TodoItem> =
            serde_json::from_slice(&bytes).map_err(|source| BackendError::Decode {
                url: url.to_string(),
                source,
            })?;
        debug!(count = todos.len(), "fetched todos");
        Ok(todos)
    }

    async fn create_todo(&self, content: &str) -> Result<(), BackendError> {
        let (url, request) = match self.create_endpoint {
            CreateEndpoint::Path => {
                let url = self.endpoint(&[TODOS_SEGMENT, content]);
                (url.clone(), self.http.post(url))
            }
            CreateEndpoint::Body => {
                let url = self.endpoint(&[CREATE_BODY_SEGMENT]);
                let request = self.http.post(url.clone()).json(&NewTodoBody {
                    new_todo: content.to_string(),
                });
                (url, request)
            }
            CreateEndpoint::Model => {
                let url = self.endpoint(&[CREATE_MODEL_SEGMENT]);
                let request = self.http.post(url.clone()).json(&TodoModelBody {
                    todo_description: content.to_string(),
                });
                (url, request)
            }
        };
        self.send(request, &url).await?;
        debug!(endpoint = %self.create_endpoint, "created todo");
        Ok(())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), BackendError> {
        let id = id.to_string();
        let url = self.endpoint(&[TODOS_SEGMENT, &id]);
        self.send(self.http.delete(url.clone()), &url).await?;
        debug!(todo_id = %id, "deleted todo");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
