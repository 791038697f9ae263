use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherBreakError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type CbResult<T> = Result<T, CipherBreakError>;
