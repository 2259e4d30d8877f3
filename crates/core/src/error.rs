#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown field: {0}")]
    UnknownField(String),
    #[error("{0} is derived from other fields and cannot be edited directly")]
    DerivedField(String),
    #[error("invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },
    #[error("{value:?} is not an allowed value for {field}")]
    NotInVocabulary { field: String, value: String },
    #[error("no mutation entry at index {0}")]
    MutationIndex(usize),
    #[error("failed to read record JSON: {0}")]
    Deserialization(serde_json::Error),
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;
