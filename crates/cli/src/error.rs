use filter_compiler::FilterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to compile the search payload: {0}")]
    Filter(#[from] FilterError),

    #[error("Failed to deserialize users from JSON: {0}")]
    UsersDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
