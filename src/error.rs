use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input file not found: {0}")]
    MissingInput(String),

    #[error("Sanity query failed: {message}")]
    StoreQuery { message: String },
}

impl From<toml::de::Error> for ImporterError {
    fn from(err: toml::de::Error) -> Self {
        ImporterError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImporterError>;
