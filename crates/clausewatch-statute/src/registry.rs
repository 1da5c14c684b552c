//! HTTP client for the national statute registry (law.go.kr DRF open API).
//!
//! Two endpoints are used: `lawSearch.do` (name search, JSON) and
//! `lawService.do` (full body, XML). Both take the operator key as `OC`.
//! Requests are not retried; every failure is logged and downgraded to an
//! absent result.

use std::time::Duration;

use clausewatch_core::{LawIdentity, RawStatuteDocument};
use serde::Deserialize;
use tracing::{info, warn};

use crate::RegistryError;

pub const DEFAULT_BASE_URL: &str = "http://www.law.go.kr/DRF";

const SEARCH_ENDPOINT: &str = "lawSearch.do";
const SERVICE_ENDPOINT: &str = "lawService.do";
/// Current-in-force statutes by effective date.
const LAW_TARGET: &str = "eflaw";
const PRECEDENT_TARGET: &str = "prec";
/// Search mode for `eflaw`: in force now.
const LAW_SEARCH_MODE: &str = "3";

/// Registry client settings. The operator key is required.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub api_key: String,
    /// Without trailing slash, e.g. `http://www.law.go.kr/DRF`.
    pub base_url: String,
    pub search_timeout: Duration,
    /// Statute bodies are large; this is longer than the search timeout.
    pub fetch_timeout: Duration,
}

impl RegistryConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            search_timeout: Duration::from_secs(5),
            fetch_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Summary row from a precedent name search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedentSummary {
    pub id: String,
    pub case_name: Option<String>,
    pub case_number: Option<String>,
}

pub struct RegistryClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    search_timeout: Duration,
    fetch_timeout: Duration,
}

impl RegistryClient {
    /// Build a client, rejecting a missing operator key up front.
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(RegistryError::MissingCredential);
        }
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_timeout: config.search_timeout,
            fetch_timeout: config.fetch_timeout,
        })
    }

    /// Resolve a law name to its registry identifier.
    ///
    /// An exact title match wins; otherwise the candidate with the shortest
    /// title is taken. Any failure yields [`LawIdentity::unresolved`].
    pub async fn resolve_law(&self, law_name: &str) -> LawIdentity {
        match self.try_resolve_law(law_name).await {
            Ok(Some(identity)) => {
                info!(
                    law = %law_name,
                    id = identity.resolved_id.as_deref().unwrap_or(""),
                    title = identity.canonical_name.as_deref().unwrap_or(""),
                    "resolved law"
                );
                identity
            }
            Ok(None) => {
                warn!(law = %law_name, "no registry candidates for law name");
                LawIdentity::unresolved(law_name)
            }
            Err(e) => {
                warn!(law = %law_name, error = %e, "law name lookup failed");
                LawIdentity::unresolved(law_name)
            }
        }
    }

    /// Fetch the full statute XML for a resolved identifier.
    ///
    /// `None` for an absent identifier (no request is made) or any failure.
    pub async fn fetch_law_document(&self, law_id: Option<&str>) -> Option<RawStatuteDocument> {
        let law_id = law_id?;
        let params = [
            ("target", LAW_TARGET),
            ("ID", law_id),
            ("type", "XML"),
        ];
        match self
            .get_bytes(SERVICE_ENDPOINT, &params, self.fetch_timeout)
            .await
        {
            Ok(bytes) => Some(RawStatuteDocument::new(bytes)),
            Err(e) => {
                warn!(id = %law_id, error = %e, "statute document download failed");
                None
            }
        }
    }

    /// Search precedents by free text, at most `limit` rows.
    pub async fn search_precedents(&self, query: &str, limit: usize) -> Vec<PrecedentSummary> {
        match self.try_search_precedents(query, limit).await {
            Ok(found) => {
                info!(query = %query, count = found.len(), "precedent search");
                found
            }
            Err(e) => {
                warn!(query = %query, error = %e, "precedent search failed");
                Vec::new()
            }
        }
    }

    /// Fetch the case XML for a precedent identifier.
    pub async fn fetch_precedent(&self, precedent_id: &str) -> Option<RawStatuteDocument> {
        let params = [
            ("target", PRECEDENT_TARGET),
            ("ID", precedent_id),
            ("type", "XML"),
        ];
        match self
            .get_bytes(SERVICE_ENDPOINT, &params, self.fetch_timeout)
            .await
        {
            Ok(bytes) => Some(RawStatuteDocument::new(bytes)),
            Err(e) => {
                warn!(id = %precedent_id, error = %e, "precedent download failed");
                None
            }
        }
    }

    async fn try_resolve_law(&self, law_name: &str) -> Result<Option<LawIdentity>, RegistryError> {
        let params = [
            ("target", LAW_TARGET),
            ("nw", LAW_SEARCH_MODE),
            ("query", law_name),
            ("type", "json"),
        ];
        let body = self
            .get_bytes(SEARCH_ENDPOINT, &params, self.search_timeout)
            .await?;
        let envelope: LawSearchEnvelope = serde_json::from_slice(&body)?;
        let candidates = envelope
            .law_search
            .map(|s| s.law.into_vec())
            .unwrap_or_default();

        Ok(select_candidate(law_name, &candidates).map(|target| LawIdentity {
            requested_name: law_name.to_string(),
            resolved_id: target
                .id
                .as_ref()
                .map(|id| normalize_law_id(&id.to_string()))
                .filter(|id| !id.is_empty()),
            canonical_name: target.title.clone(),
        }))
    }

    async fn try_search_precedents(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PrecedentSummary>, RegistryError> {
        let display = limit.to_string();
        let params = [
            ("target", PRECEDENT_TARGET),
            ("query", query),
            ("display", display.as_str()),
            ("type", "json"),
        ];
        let body = self
            .get_bytes(SEARCH_ENDPOINT, &params, self.search_timeout)
            .await?;
        let envelope: PrecSearchEnvelope = serde_json::from_slice(&body)?;
        let rows = envelope
            .prec_search
            .map(|s| s.prec.into_vec())
            .unwrap_or_default();

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id?.to_string();
                Some(PrecedentSummary {
                    id,
                    case_name: row.case_name,
                    case_number: row.case_number,
                })
            })
            .take(limit)
            .collect())
    }

    /// GET `{base_url}/{endpoint}` with the operator key prepended to `params`.
    async fn get_bytes(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<Vec<u8>, RegistryError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let resp = self
            .client
            .get(&url)
            .query(&[("OC", self.api_key.as_str())])
            .query(params)
            .timeout(timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RegistryError::Server {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

/// Strip leading zeros from an all-digit identifier (`"007"` → `"7"`).
///
/// Anything that is not purely ASCII digits is returned unchanged, including
/// other Unicode decimal digits such as full-width `"００７"`.
pub fn normalize_law_id(raw: &str) -> String {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.to_string();
    }
    match raw.trim_start_matches('0') {
        "" => "0".to_string(),
        digits => digits.to_string(),
    }
}

/// Exact title match first, else the shortest title (first one on ties).
fn select_candidate<'a>(law_name: &str, candidates: &'a [LawCandidate]) -> Option<&'a LawCandidate> {
    candidates
        .iter()
        .find(|c| c.title.as_deref() == Some(law_name))
        .or_else(|| candidates.iter().min_by_key(|c| c.title_len()))
}

// ── Response shapes ──

/// The registry returns a bare object instead of a one-element array for single hits.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Identifiers usually arrive as zero-padded strings, occasionally as numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RegistryId {
    Text(String),
    Number(u64),
}

impl std::fmt::Display for RegistryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LawSearchEnvelope {
    #[serde(rename = "LawSearch")]
    law_search: Option<LawSearchBody>,
}

#[derive(Debug, Deserialize)]
struct LawSearchBody {
    #[serde(default)]
    law: OneOrMany<LawCandidate>,
}

#[derive(Debug, Deserialize)]
struct LawCandidate {
    #[serde(rename = "법령ID")]
    id: Option<RegistryId>,
    #[serde(rename = "법령명한글")]
    title: Option<String>,
}

impl LawCandidate {
    fn title_len(&self) -> usize {
        self.title.as_deref().map_or(0, |t| t.chars().count())
    }
}

#[derive(Debug, Deserialize)]
struct PrecSearchEnvelope {
    #[serde(rename = "PrecSearch")]
    prec_search: Option<PrecSearchBody>,
}

#[derive(Debug, Deserialize)]
struct PrecSearchBody {
    #[serde(default)]
    prec: OneOrMany<PrecedentRow>,
}

#[derive(Debug, Deserialize)]
struct PrecedentRow {
    #[serde(rename = "판례일련번호")]
    id: Option<RegistryId>,
    #[serde(rename = "사건명")]
    case_name: Option<String>,
    #[serde(rename = "사건번호")]
    case_number: Option<String>,
}
