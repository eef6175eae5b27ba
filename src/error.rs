use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("content has not been loaded yet")]
    NotLoaded,
    #[error("no {collection} record with id {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },
    #[error("unknown field `{field}` for {collection}")]
    UnknownField {
        collection: &'static str,
        field: String,
    },
    #[error("{collection} identifiers are assigned by the store and cannot be changed")]
    ImmutableId { collection: &'static str },
    #[error("invalid record: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
