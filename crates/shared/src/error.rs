use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a 422 response body, as sent by the model create endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub detail: Vec<ValidationIssue>,
}

impl ValidationErrorBody {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Renders issues as `body.todo_description: field required; ...`.
    pub fn summary(&self) -> String {
        self.detail
            .iter()
            .map(|issue| {
                let loc = issue
                    .loc
                    .iter()
                    .map(|part| match part {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                if loc.is_empty() {
                    issue.msg.clone()
                } else {
                    format!("{loc}: {}", issue.msg)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}
