//! Query seam for the law and precedent corpora.
//!
//! The detector only ever asks a corpus for the `k` best passages for a
//! clause. How a corpus stores or ranks its passages is up to the implementor.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus query failed: {0}")]
    Query(String),
}

/// A searchable, read-only passage corpus.
#[async_trait]
pub trait PassageSearch: Send + Sync {
    /// Up to `k` passages most relevant to `query`, best first.
    ///
    /// Returns an empty vector when nothing matches.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, CorpusError>;
}

#[async_trait]
impl<T: PassageSearch + ?Sized> PassageSearch for std::sync::Arc<T> {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, CorpusError> {
        (**self).search(query, k).await
    }
}
