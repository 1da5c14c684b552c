use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry API key is missing")]
    MissingCredential,

    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry returned {status}: {body}")]
    Server { status: u16, body: String },

    #[cfg(feature = "http")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
}
