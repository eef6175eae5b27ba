use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub value: String,
}

/// One field-granular change to an existing record.
#[derive(Debug, Deserialize)]
pub struct UpdateEntityRequest {
    pub field: String,
    pub value: Value,
}

/// The public visitor comment form.
#[derive(Debug, Deserialize)]
pub struct SubmitCommentRequest {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    pub comment: String,
}
