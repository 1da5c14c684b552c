//! Storage layer: JSON-persisted passage corpora with bigram keyword ranking.

mod error;
mod passages;

pub use error::StoreError;
pub use passages::{CorpusKind, PassageStore};
