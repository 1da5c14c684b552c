//! Vertical card display for detection results and extracted articles.

use clausewatch_core::{Article, DetectionResult, LawIdentity};

const LABEL_WIDTH: usize = 10;

// ── Detection ──

/// Result card for one clause, with the suggestion when one was generated.
pub fn format_result_card(
    index: usize,
    total: usize,
    result: &DetectionResult,
    suggestion: Option<&str>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Clause {}/{} ===\n", index + 1, total));
    out.push_str(&indent(&result.clause, "  "));
    out.push_str("\n\n");

    out.push_str("Verdict\n");
    out.push_str(&field("toxic", if result.is_toxic { "yes" } else { "no" }));
    out.push_str(&field(
        "risk",
        &format!("{:.1} / 10  {}", result.risk_score, risk_bar(result.risk_score)),
    ));
    out.push_str(&field("reason", &result.reason));
    out.push('\n');

    out.push_str("Context\n");
    out.push_str(&indent(&result.context_used, "  "));
    out.push('\n');

    if let Some(text) = suggestion {
        out.push_str("\nSuggestion\n");
        out.push_str(&indent(text, "  "));
        out.push('\n');
    }
    out
}

pub fn print_result_card(
    index: usize,
    total: usize,
    result: &DetectionResult,
    suggestion: Option<&str>,
) {
    println!("{}", format_result_card(index, total, result, suggestion));
}

// ── Articles ──

pub fn print_articles(identity: &LawIdentity, articles: &[Article]) {
    println!("=== {} ===", identity.display_name());
    if let Some(id) = &identity.resolved_id {
        println!("{}", field("law id", id).trim_end());
    }
    println!("{}", field("articles", &articles.len().to_string()).trim_end());
    println!();

    for article in articles {
        println!("{}", article.full_text);
        for paragraph in &article.subclause_texts {
            println!("{}", indent(paragraph, "    "));
        }
        println!();
    }
}

// ── Helpers ──

fn field(label: &str, value: &str) -> String {
    format!("  {label:<LABEL_WIDTH$} {value}\n")
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ten-cell bar, one cell per risk point (rounded).
fn risk_bar(risk: f64) -> String {
    let filled = risk.clamp(0.0, 10.0).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toxic() -> DetectionResult {
        DetectionResult {
            clause: "근로자는 퇴직 시 퇴직금을 포기한다.".into(),
            is_toxic: true,
            risk_score: 8.0,
            reason: "퇴직금 사전 포기 약정은 무효".into(),
            context_used: "=== [관련 법령] ===\n[근로자퇴직급여 보장법] 제8조\n\n=== [관련 판례] ===\n관련 판례 없음".into(),
        }
    }

    #[test]
    fn card_has_verdict_and_context() {
        let card = format_result_card(0, 2, &toxic(), None);
        assert!(card.starts_with("=== Clause 1/2 ===\n  근로자는 퇴직 시"));
        assert!(card.contains("  toxic      yes\n"));
        assert!(card.contains("  risk       8.0 / 10  [########..]\n"));
        assert!(card.contains("  === [관련 판례] ===\n  관련 판례 없음"));
        assert!(!card.contains("Suggestion"));
    }

    #[test]
    fn card_includes_suggestion() {
        let card = format_result_card(1, 2, &toxic(), Some("1. **쉬운 해석**: ...\n2. **수정 제안**: ..."));
        assert!(card.contains("Suggestion\n  1. **쉬운 해석**: ...\n  2. **수정 제안**: ..."));
    }

    #[test]
    fn risk_bar_bounds() {
        assert_eq!(risk_bar(0.0), "[..........]");
        assert_eq!(risk_bar(4.4), "[####......]");
        assert_eq!(risk_bar(10.0), "[##########]");
    }
}
