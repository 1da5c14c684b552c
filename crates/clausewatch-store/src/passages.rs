//! In-memory passage corpus persisted as a single JSON file.
//!
//! Ranking is by the number of distinct character bigrams a passage shares
//! with the query, whitespace ignored. Korean spacing in contracts is
//! inconsistent, so word tokens would miss obvious matches ("퇴직금을" vs
//! "퇴직금"). Ties keep corpus order.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use async_trait::async_trait;
use clausewatch_core::{CorpusError, Passage, PassageSearch};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::StoreError;

/// Which corpus a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusKind {
    Law,
    Precedent,
}

impl CorpusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Law => "law",
            Self::Precedent => "precedent",
        }
    }

    /// Default file name inside a data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Law => "law_corpus.json",
            Self::Precedent => "precedent_corpus.json",
        }
    }
}

/// On-disk layout.
#[derive(Serialize, Deserialize)]
struct CorpusFile {
    kind: CorpusKind,
    /// RFC 3339 timestamp string.
    built_at: String,
    passages: Vec<Passage>,
}

/// A loaded corpus with its bigram index.
pub struct PassageStore {
    kind: CorpusKind,
    built_at: String,
    passages: Vec<Passage>,
    index: Vec<HashSet<(char, char)>>,
}

impl PassageStore {
    /// Build a fresh corpus stamped with the current time.
    pub fn from_passages(kind: CorpusKind, passages: Vec<Passage>) -> Self {
        Self::with_built_at(kind, chrono::Utc::now().to_rfc3339(), passages)
    }

    fn with_built_at(kind: CorpusKind, built_at: String, passages: Vec<Passage>) -> Self {
        let index = passages.iter().map(|p| bigrams(&p.text)).collect();
        Self {
            kind,
            built_at,
            passages,
            index,
        }
    }

    /// Load a corpus file, checking it holds the expected kind.
    pub fn open(path: &Path, expected: CorpusKind) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::CorpusNotFound(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);
        let file: CorpusFile = serde_json::from_reader(reader)?;
        if file.kind != expected {
            return Err(StoreError::KindMismatch {
                path: path.to_path_buf(),
                expected: expected.as_str(),
                found: file.kind.as_str(),
            });
        }
        info!(
            path = %path.display(),
            kind = file.kind.as_str(),
            passages = file.passages.len(),
            built_at = %file.built_at,
            "loaded corpus"
        );
        Ok(Self::with_built_at(file.kind, file.built_at, file.passages))
    }

    /// Write the corpus to `path`, replacing any existing file atomically.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let file = CorpusFile {
            kind: self.kind,
            built_at: self.built_at.clone(),
            passages: self.passages.clone(),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, &file)?;
            writer.flush()?;
        }
        tmp.persist(path)?;

        info!(
            path = %path.display(),
            kind = self.kind.as_str(),
            passages = self.passages.len(),
            "saved corpus"
        );
        Ok(())
    }

    pub fn built_at(&self) -> &str {
        &self.built_at
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Up to `k` passages ranked by shared bigrams, best first.
    ///
    /// Passages sharing no bigram with the query are never returned.
    pub fn rank(&self, query: &str, k: usize) -> Vec<&Passage> {
        let terms = bigrams(query);
        if terms.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, usize)> = self
            .index
            .iter()
            .enumerate()
            .map(|(i, grams)| (i, terms.intersection(grams).count()))
            .filter(|&(_, score)| score > 0)
            .collect();
        // Stable: equal scores stay in corpus order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored
            .into_iter()
            .take(k)
            .map(|(i, _)| &self.passages[i])
            .collect()
    }
}

#[async_trait]
impl PassageSearch for PassageStore {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, CorpusError> {
        let hits: Vec<String> = self.rank(query, k).into_iter().map(Passage::render).collect();
        debug!(kind = self.kind.as_str(), k, hits = hits.len(), "corpus search");
        Ok(hits)
    }
}

fn bigrams(text: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
