use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupercutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("External tool error: {0}")]
    Tool(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to remove {failed} of {total} subtitle files")]
    Cleanup { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, SupercutError>;
