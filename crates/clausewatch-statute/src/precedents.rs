//! Precedent extraction from registry case XML.
//!
//! Only the headnote sections are kept: 판시사항 (issues) and 판결요지
//! (holding). Full reasoning (판례내용) is too long to be useful context for a
//! single clause.

use clausewatch_core::{Passage, RawStatuteDocument};
use tracing::warn;

use crate::RegistryError;
use crate::xml::{own_text, parse_document};

const CASE_NAME: &str = "사건명";
const CASE_NUMBER: &str = "사건번호";
const SECTIONS: &[&str] = &["판시사항", "판결요지"];

/// Source label for a case document that carries no name or number.
pub const UNNAMED_CASE: &str = "판례";

/// Extract a precedent passage, `None` when the case has no headnote text or fails to parse.
pub fn extract_precedent(document: Option<&RawStatuteDocument>) -> Option<Passage> {
    let document = document?;
    match parse_precedent(document.as_bytes()) {
        Ok(passage) => passage,
        Err(e) => {
            warn!(error = %e, bytes = document.len(), "precedent XML parse failed");
            None
        }
    }
}

fn parse_precedent(bytes: &[u8]) -> Result<Option<Passage>, RegistryError> {
    let doc = parse_document(bytes)?;

    let field = |name: &str| -> Option<String> {
        let node = doc.descendants().find(|n| n.has_tag_name(name))?;
        let value = clean_markup(&own_text(node));
        (!value.is_empty()).then_some(value)
    };

    let body: Vec<String> = SECTIONS
        .iter()
        .copied()
        .filter_map(|section| field(section).map(|text| format!("[{section}] {text}")))
        .collect();
    if body.is_empty() {
        return Ok(None);
    }

    let source = match (field(CASE_NAME), field(CASE_NUMBER)) {
        (Some(name), Some(number)) => format!("{name} ({number})"),
        (Some(name), None) => name,
        (None, Some(number)) => number,
        (None, None) => UNNAMED_CASE.to_string(),
    };

    Ok(Some(Passage::new(source, body.join("\n"))))
}

/// Registry case text embeds HTML line breaks inside CDATA.
fn clean_markup(raw: &str) -> String {
    raw.replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("<br>", "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(xml: &str) -> Option<Passage> {
        extract_precedent(Some(&RawStatuteDocument::from(xml)))
    }

    #[test]
    fn headnote_sections_with_case_label() {
        let xml = r#"<PrecService>
            <사건명>퇴직금</사건명>
            <사건번호>2006다37274</사건번호>
            <판시사항><![CDATA[[1] 퇴직금 포기 약정의 효력<br/>[2] 그 판단 기준]]></판시사항>
            <판결요지>퇴직금청구권을 사전에 포기하는 약정은 무효이다.</판결요지>
            <판례내용>긴 본문</판례내용>
        </PrecService>"#;
        let passage = extract(xml).unwrap();
        assert_eq!(passage.source, "퇴직금 (2006다37274)");
        assert_eq!(
            passage.text,
            "[판시사항] [1] 퇴직금 포기 약정의 효력\n[2] 그 판단 기준\n\
             [판결요지] 퇴직금청구권을 사전에 포기하는 약정은 무효이다."
        );
        assert!(!passage.text.contains("긴 본문"));
    }

    #[test]
    fn single_section_is_enough() {
        let xml = "<PrecService><사건번호>2019다1</사건번호><판결요지>요지</판결요지></PrecService>";
        let passage = extract(xml).unwrap();
        assert_eq!(passage.source, "2019다1");
        assert_eq!(passage.text, "[판결요지] 요지");
    }

    #[test]
    fn unnamed_case_label() {
        let xml = "<PrecService><판시사항>사항</판시사항></PrecService>";
        assert_eq!(extract(xml).unwrap().source, UNNAMED_CASE);
    }

    #[test]
    fn no_headnote_is_none() {
        let xml = "<PrecService><사건명>X</사건명><판례내용>본문만</판례내용></PrecService>";
        assert!(extract(xml).is_none());
    }

    #[test]
    fn doctype_and_comments_tolerated() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE PrecService><PrecService><판결요지>앞<!--주석-->뒤</판결요지></PrecService>"#;
        assert_eq!(extract(xml).unwrap().text, "[판결요지] 앞뒤");
    }

    #[test]
    fn malformed_is_none() {
        assert!(extract("<PrecService><판시사항>open").is_none());
        assert!(extract_precedent(None).is_none());
    }
}
