//! Corpus files under the data directory: build from the registry, or load.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, bail};
use clausewatch_statute::{RegistryClient, build_law_passages, build_precedent_passages};
use clausewatch_store::{CorpusKind, PassageStore};

/// Statutes split into the law corpus.
pub const LAW_NAMES: &[&str] = &[
    "근로기준법",
    "최저임금법",
    "근로자퇴직급여 보장법",
    "남녀고용평등과 일ㆍ가정 양립 지원에 관한 법률",
    "기간제 및 단시간근로자 보호 등에 관한 법률",
];

/// Precedent searches feeding the precedent corpus.
pub const PRECEDENT_QUERIES: &[&str] = &["퇴직금", "위약금", "포괄임금", "해고", "최저임금"];

pub const PRECEDENTS_PER_QUERY: usize = 3;

pub const ALL_KINDS: [CorpusKind; 2] = [CorpusKind::Law, CorpusKind::Precedent];

pub fn corpus_path(data_dir: &Path, kind: CorpusKind) -> PathBuf {
    data_dir.join(kind.file_name())
}

/// Kinds with no corpus file yet.
pub fn missing(data_dir: &Path) -> Vec<CorpusKind> {
    ALL_KINDS
        .into_iter()
        .filter(|&kind| !corpus_path(data_dir, kind).exists())
        .collect()
}

/// Collect passages for `kind` from the registry and persist them.
///
/// An empty harvest is an error and leaves any existing file untouched.
pub async fn build(
    client: &RegistryClient,
    data_dir: &Path,
    kind: CorpusKind,
) -> anyhow::Result<PassageStore> {
    let start = Instant::now();
    eprintln!("Building {} corpus...", kind.as_str());

    let passages = match kind {
        CorpusKind::Law => build_law_passages(client, LAW_NAMES).await,
        CorpusKind::Precedent => {
            build_precedent_passages(client, PRECEDENT_QUERIES, PRECEDENTS_PER_QUERY).await
        }
    };
    if passages.is_empty() {
        bail!(
            "no {} passages collected; check the registry key and network access",
            kind.as_str()
        );
    }

    let store = PassageStore::from_passages(kind, passages);
    let path = corpus_path(data_dir, kind);
    store
        .save(&path)
        .with_context(|| format!("writing {}", path.display()))?;

    eprintln!(
        "  {} passages → {} ({:.1}s)",
        store.len(),
        path.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(store)
}

/// Build every corpus, skipping files already on disk unless `force`.
///
/// Returns the kinds that were (re)built.
pub async fn build_all(
    client: &RegistryClient,
    data_dir: &Path,
    force: bool,
) -> anyhow::Result<Vec<CorpusKind>> {
    let mut built = Vec::new();
    for kind in ALL_KINDS {
        let path = corpus_path(data_dir, kind);
        if !force && path.exists() {
            eprintln!("{} exists, skipping (use --force to rebuild)", path.display());
            continue;
        }
        build(client, data_dir, kind).await?;
        built.push(kind);
    }
    Ok(built)
}

pub fn open(data_dir: &Path, kind: CorpusKind) -> anyhow::Result<PassageStore> {
    let path = corpus_path(data_dir, kind);
    PassageStore::open(&path, kind).with_context(|| format!("loading {}", path.display()))
}
