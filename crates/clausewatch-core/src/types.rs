//! Shared domain types passed between statute acquisition, retrieval, and scoring.

use serde::{Deserialize, Serialize};

/// Outcome of resolving a human-readable law name against the statute registry.
///
/// `resolved_id` and `canonical_name` are `None` when the lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawIdentity {
    pub requested_name: String,
    pub resolved_id: Option<String>,
    pub canonical_name: Option<String>,
}

impl LawIdentity {
    /// Identity for a name the registry could not resolve.
    pub fn unresolved(requested_name: impl Into<String>) -> Self {
        Self {
            requested_name: requested_name.into(),
            resolved_id: None,
            canonical_name: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_id.is_some()
    }

    /// Name to attribute passages to: the registry title when known.
    pub fn display_name(&self) -> &str {
        self.canonical_name
            .as_deref()
            .unwrap_or(&self.requested_name)
    }
}

/// Raw body of a statute or precedent document as returned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStatuteDocument(Vec<u8>);

impl RawStatuteDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for RawStatuteDocument {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&str> for RawStatuteDocument {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

/// One statute article with its paragraph detail.
///
/// Each entry in `subclause_texts` is a paragraph, with any nested items
/// appended as `"\n  "`-indented continuation lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub full_text: String,
    pub subclause_texts: Vec<String>,
}

impl Article {
    /// Text stored in the law corpus.
    ///
    /// Paragraph detail is appended after the article body; the body is never dropped.
    pub fn stored_text(&self) -> String {
        if self.subclause_texts.is_empty() {
            self.full_text.clone()
        } else {
            format!("{}\n{}", self.full_text, self.subclause_texts.join("\n"))
        }
    }
}

/// A retrievable unit of a law or precedent corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Statute title or precedent case name.
    pub source: String,
    pub text: String,
}

impl Passage {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }

    /// Rendering used when a passage is handed to the scorer.
    pub fn render(&self) -> String {
        format!("[{}] {}", self.source, self.text)
    }
}

/// Retrieved grounding evidence for one clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextBlock {
    pub law_passages: Vec<String>,
    pub precedent_passages: Vec<String>,
}

impl ContextBlock {
    pub const LAW_HEADER: &'static str = "=== [관련 법령] ===";
    pub const PRECEDENT_HEADER: &'static str = "=== [관련 판례] ===";
    pub const NO_LAW: &'static str = "관련 법령 없음";
    pub const NO_PRECEDENT: &'static str = "관련 판례 없음";

    /// Render both sections into the single labelled block given to the scorer.
    ///
    /// An empty section is replaced by its placeholder so neither is ever blank.
    pub fn render(&self) -> String {
        let law_text = if self.law_passages.is_empty() {
            Self::NO_LAW.to_string()
        } else {
            self.law_passages.join("\n")
        };
        let precedent_text = match self.precedent_passages.first() {
            Some(first) => first.clone(),
            None => Self::NO_PRECEDENT.to_string(),
        };
        format!(
            "{}\n{law_text}\n\n{}\n{precedent_text}",
            Self::LAW_HEADER,
            Self::PRECEDENT_HEADER
        )
    }
}

/// Verdict for a single contract clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub clause: String,
    pub is_toxic: bool,
    /// 0 (safe) to 10 (toxic), one decimal place.
    pub risk_score: f64,
    pub reason: String,
    pub context_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_text_flat_article() {
        let article = Article {
            full_text: "제1조(목적) 이 법은 목적으로 한다.".into(),
            subclause_texts: vec![],
        };
        assert_eq!(article.stored_text(), "제1조(목적) 이 법은 목적으로 한다.");
    }

    #[test]
    fn stored_text_keeps_body_and_paragraphs() {
        let article = Article {
            full_text: "A".into(),
            subclause_texts: vec!["B\n  C".into(), "D".into()],
        };
        assert_eq!(article.stored_text(), "A\nB\n  C\nD");
    }

    #[test]
    fn context_block_placeholders_when_empty() {
        let rendered = ContextBlock::default().render();
        assert_eq!(
            rendered,
            "=== [관련 법령] ===\n관련 법령 없음\n\n=== [관련 판례] ===\n관련 판례 없음"
        );
    }

    #[test]
    fn context_block_joins_laws_and_uses_first_precedent() {
        let block = ContextBlock {
            law_passages: vec!["law one".into(), "law two".into()],
            precedent_passages: vec!["prec one".into(), "prec two".into()],
        };
        let rendered = block.render();
        assert!(rendered.contains("law one\nlaw two"));
        assert!(rendered.ends_with("prec one"));
        assert!(!rendered.contains("prec two"));
    }

    #[test]
    fn context_block_placeholder_only_for_empty_section() {
        let block = ContextBlock {
            law_passages: vec!["[근로기준법] 제36조".into()],
            precedent_passages: vec![],
        };
        let rendered = block.render();
        assert!(rendered.contains("[근로기준법] 제36조"));
        assert!(!rendered.contains(ContextBlock::NO_LAW));
        assert!(rendered.contains(ContextBlock::NO_PRECEDENT));
    }

    #[test]
    fn unresolved_identity() {
        let identity = LawIdentity::unresolved("근로기준법");
        assert!(!identity.is_resolved());
        assert_eq!(identity.display_name(), "근로기준법");
    }

    #[test]
    fn passage_render() {
        let passage = Passage::new("근로기준법", "제2조(정의)");
        assert_eq!(passage.render(), "[근로기준법] 제2조(정의)");
    }

    #[test]
    fn detection_result_json_field_names() {
        let result = DetectionResult {
            clause: "퇴직금을 포기한다".into(),
            is_toxic: true,
            risk_score: 8.0,
            reason: "강행규정 위반".into(),
            context_used: String::new(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_toxic"], true);
        assert_eq!(json["risk_score"], 8.0);
    }
}
