use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path segment shared by list (`GET /api`), path-form create and delete.
pub const TODOS_SEGMENT: &str = "api";
pub const CREATE_BODY_SEGMENT: &str = "api_body";
pub const CREATE_MODEL_SEGMENT: &str = "api_model";

/// Which create convention the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateEndpoint {
    /// `POST /api/{content}` with no body.
    #[default]
    Path,
    /// `POST /api_body` with [`NewTodoBody`].
    Body,
    /// `POST /api_model` with [`TodoModelBody`]; 422 on validation failure.
    Model,
}

impl CreateEndpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Body => "body",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for CreateEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown create endpoint '{0}', expected one of: path, body, model")]
pub struct ParseCreateEndpointError(String);

impl FromStr for CreateEndpoint {
    type Err = ParseCreateEndpointError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "body" => Ok(Self::Body),
            "model" => Ok(Self::Model),
            _ => Err(ParseCreateEndpointError(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodoBody {
    pub new_todo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoModelBody {
    pub todo_description: String,
}
