use ctomop_core::RecordError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to parse YAML config: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error(transparent)]
    Record(#[from] RecordError),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
