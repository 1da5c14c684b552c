use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corpus file not found: {0}")]
    CorpusNotFound(std::path::PathBuf),

    #[error("corpus file {path} holds a {found} corpus, expected {expected}")]
    KindMismatch {
        path: std::path::PathBuf,
        expected: &'static str,
        found: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to persist corpus: {0}")]
    Persist(#[from] tempfile::PersistError),
}
