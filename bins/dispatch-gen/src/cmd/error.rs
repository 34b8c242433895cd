use convoy_gen::error::GenError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchGenError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Gen(#[from] GenError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
