//! Corpus construction: registry → documents → passages.
//!
//! Runs offline, once per corpus build. Names or queries that fail at any
//! stage simply contribute no passages.

use std::collections::HashSet;

use clausewatch_core::Passage;
use tracing::info;

use crate::registry::RegistryClient;
use crate::{extract_articles, extract_precedent};

/// Resolve, fetch and split each named statute into article passages.
///
/// Passages are attributed to the registry's canonical title and kept in
/// statute order, then article order.
pub async fn build_law_passages<S: AsRef<str>>(
    client: &RegistryClient,
    law_names: &[S],
) -> Vec<Passage> {
    let mut passages = Vec::new();

    for name in law_names {
        let identity = client.resolve_law(name.as_ref()).await;
        let document = client
            .fetch_law_document(identity.resolved_id.as_deref())
            .await;
        let articles = extract_articles(document.as_ref());

        info!(
            law = %identity.display_name(),
            articles = articles.len(),
            "statute split into articles"
        );
        passages.extend(
            articles
                .iter()
                .map(|article| Passage::new(identity.display_name(), article.stored_text())),
        );
    }

    passages
}

/// Search precedents per query and keep each case's headnote once.
pub async fn build_precedent_passages<S: AsRef<str>>(
    client: &RegistryClient,
    queries: &[S],
    per_query: usize,
) -> Vec<Passage> {
    let mut seen = HashSet::new();
    let mut passages = Vec::new();

    for query in queries {
        let query = query.as_ref();
        let mut added = 0usize;
        for summary in client.search_precedents(query, per_query).await {
            if !seen.insert(summary.id.clone()) {
                continue;
            }
            let document = client.fetch_precedent(&summary.id).await;
            if let Some(passage) = extract_precedent(document.as_ref()) {
                passages.push(passage);
                added += 1;
            }
        }
        info!(query = %query, added, "precedent passages collected");
    }

    passages
}
