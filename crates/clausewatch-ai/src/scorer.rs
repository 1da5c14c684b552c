//! Clause safety scoring against the fixed contract rubric.

use std::sync::Arc;

use clausewatch_core::Rubric;
use tracing::info;

use crate::{EvalError, EvaluationCase, RubricEvaluator};

/// Pass mark handed to the evaluator (0-1 safety scale).
///
/// The toxicity verdict does not use this; see `clausewatch_core::classify`.
pub const SAFETY_THRESHOLD: f64 = 0.6;

const METRIC_NAME: &str = "Contract Safety Score";

const CRITERIA: &str = "\
당신은 한국 근로기준법에 따라 근로계약서를 검토하는 엄격한 감사관입니다.
입력된 근로계약 조항을 제공된 관련 법령과 판례(Context)에 비추어, 근로자에게 불리하거나
불법이거나 독소조항에 해당하는지 평가하세요.

[독소조항 판단 기준]
1. 강행규정 위반: 최저임금 미달, 퇴직금 포기, 위약금 예정 등 법이 금지하는 내용인가?
2. 포괄임금 오남용: 근로시간 산정이 가능한데도 포괄임금제로 수당 지급을 회피하는가?
3. 불공정성: 사용자에게 일방적으로 유리하거나 모호한 표현으로 근로자의 권리를 제한하는가?
4. 절차 무시: 해고, 징계 등의 절차를 법적 기준보다 간소화하거나 생략하는가?";

const EVALUATION_STEPS: &[&str] = &[
    "입력된 계약 조항의 핵심 내용을 파악한다.",
    "제공된 Context(법령/판례)와 조항을 대조하여 법정 최저 기준 준수 여부를 확인한다.",
    "조항에 '위약금', '포기', '민형사상 이의 제기 금지' 등 불법적 표현이 있는지 확인한다.",
    "법 위반 사항이 있으면 낮은 점수(위험)를, 준수했다면 높은 점수(안전)를 부여한다.",
];

/// Evaluator output for one clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyAssessment {
    /// 0 (toxic) to 1 (safe).
    pub safety_score: f64,
    pub reason: String,
}

/// Runs the rubric evaluator once per clause with the retrieved context as sole evidence.
pub struct ClauseScorer {
    evaluator: Arc<dyn RubricEvaluator>,
    rubric: Rubric,
    evaluation_steps: Vec<String>,
    criteria: String,
    threshold: f64,
}

impl ClauseScorer {
    pub fn new(evaluator: Arc<dyn RubricEvaluator>) -> Self {
        Self {
            evaluator,
            rubric: Rubric::contract_safety(),
            evaluation_steps: EVALUATION_STEPS.iter().map(|s| s.to_string()).collect(),
            criteria: CRITERIA.to_string(),
            threshold: SAFETY_THRESHOLD,
        }
    }

    pub async fn score(&self, clause: &str, context: &str) -> Result<SafetyAssessment, EvalError> {
        let retrieval_context = [context.to_string()];
        let case = EvaluationCase {
            name: METRIC_NAME,
            input: clause,
            retrieval_context: &retrieval_context,
            rubric: &self.rubric,
            evaluation_steps: &self.evaluation_steps,
            criteria: &self.criteria,
            threshold: self.threshold,
        };

        let verdict = self.evaluator.evaluate(&case).await?;
        info!(
            safety = verdict.score,
            passed = verdict.success,
            "clause scored"
        );
        Ok(SafetyAssessment {
            safety_score: verdict.score,
            reason: verdict.reason,
        })
    }
}
