//! Law and precedent retrieval for a single clause.

use std::sync::Arc;

use clausewatch_core::{ContextBlock, CorpusError, PassageSearch};
use tracing::debug;

/// Statute passages requested per clause.
pub const LAW_TOP_K: usize = 2;
/// Precedent passages requested per clause.
pub const PRECEDENT_TOP_K: usize = 1;

/// Queries both corpora for every clause. Nothing is cached.
pub struct ContextRetriever {
    laws: Arc<dyn PassageSearch>,
    precedents: Arc<dyn PassageSearch>,
}

impl ContextRetriever {
    pub fn new(laws: Arc<dyn PassageSearch>, precedents: Arc<dyn PassageSearch>) -> Self {
        Self { laws, precedents }
    }

    /// Statute corpus first, then precedents; both lookups run in sequence.
    pub async fn retrieve(&self, clause: &str) -> Result<ContextBlock, CorpusError> {
        let law_passages = self.laws.search(clause, LAW_TOP_K).await?;
        let precedent_passages = self.precedents.search(clause, PRECEDENT_TOP_K).await?;
        debug!(
            laws = law_passages.len(),
            precedents = precedent_passages.len(),
            "retrieved context"
        );
        Ok(ContextBlock {
            law_passages,
            precedent_passages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCorpus;

    #[tokio::test]
    async fn asks_two_laws_and_one_precedent() {
        let laws = FakeCorpus::new(&["law a", "law b", "law c"]);
        let precedents = FakeCorpus::new(&["prec a", "prec b"]);
        let retriever = ContextRetriever::new(laws.clone(), precedents.clone());

        let block = retriever.retrieve("퇴직금").await.unwrap();
        assert_eq!(block.law_passages, vec!["law a", "law b"]);
        assert_eq!(block.precedent_passages, vec!["prec a"]);
        assert_eq!(laws.requests(), vec![("퇴직금".to_string(), 2)]);
        assert_eq!(precedents.requests(), vec![("퇴직금".to_string(), 1)]);
    }

    #[tokio::test]
    async fn empty_corpus_renders_placeholder() {
        let retriever =
            ContextRetriever::new(FakeCorpus::new(&[]), FakeCorpus::new(&["prec a"]));
        let rendered = retriever.retrieve("x").await.unwrap().render();
        assert!(rendered.contains(&format!("{}\n{}", ContextBlock::LAW_HEADER, ContextBlock::NO_LAW)));
        assert!(rendered.ends_with("prec a"));
    }

    #[tokio::test]
    async fn every_call_requeries() {
        let laws = FakeCorpus::new(&["law a"]);
        let retriever = ContextRetriever::new(laws.clone(), FakeCorpus::new(&[]));
        retriever.retrieve("same").await.unwrap();
        retriever.retrieve("same").await.unwrap();
        assert_eq!(laws.requests().len(), 2);
    }

    #[tokio::test]
    async fn corpus_failure_propagates() {
        let retriever = ContextRetriever::new(FakeCorpus::failing(), FakeCorpus::new(&[]));
        assert!(retriever.retrieve("x").await.is_err());
    }
}
