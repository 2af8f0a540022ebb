use thiserror::Error;

#[derive(Error, Debug)]
pub enum RefineryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input is missing required column: {0}")]
    MissingColumn(String),

    #[error("Input has no header row: {path}")]
    EmptyInput { path: String },
}

pub type Result<T> = std::result::Result<T, RefineryError>;
