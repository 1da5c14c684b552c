//! Plain-language explanation and rewrite for clauses judged toxic.

use std::sync::Arc;

use clausewatch_core::DetectionResult;
use tracing::info;

use crate::{LanguageModel, LlmError};

/// Returned without a model call when the clause is not toxic.
pub const SAFE_CLAUSE_MESSAGE: &str = "법적으로 문제없는 안전한 조항입니다.";

fn build_prompt(result: &DetectionResult) -> String {
    format!(
        "당신은 근로자의 편에 선 노동법 전문가입니다.\n\
         아래 근로계약 조항은 독소조항으로 판별되었습니다.\n\
         \n\
         [원문 조항]: {clause}\n\
         [위험 판단 근거]: {reason}\n\
         [참고 법령/판례]:\n\
         {context}\n\
         \n\
         다음 두 가지를 마크다운 형식으로 작성하세요:\n\
         1. **쉬운 해석**: 이 조항이 왜 위험한지 법을 모르는 사람도 이해할 수 있게 2문장 이내로 설명\n\
         2. **수정 제안**: 법에 맞고 근로자에게 불리하지 않도록 고쳐 쓴 조항 예시",
        clause = result.clause,
        reason = result.reason,
        context = result.context_used,
    )
}

pub struct SuggestionGenerator {
    model: Arc<dyn LanguageModel>,
}

impl SuggestionGenerator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// The model's reply, verbatim; its format is not checked.
    pub async fn suggest(&self, result: &DetectionResult) -> Result<String, LlmError> {
        if !result.is_toxic {
            info!("clause not toxic, skipping suggestion");
            return Ok(SAFE_CLAUSE_MESSAGE.to_string());
        }
        self.model.generate(&build_prompt(result)).await
    }
}
