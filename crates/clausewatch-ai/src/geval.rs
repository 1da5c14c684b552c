//! Rubric evaluation in the G-Eval style: criteria, explicit evaluation steps,
//! and score bands are given to a judge model, which returns an integer score
//! and a justification in one reply.

use std::sync::Arc;

use async_trait::async_trait;
use clausewatch_core::Rubric;
use serde::Deserialize;
use tracing::debug;

use crate::{EvalError, LanguageModel};

/// Everything the judge needs for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationCase<'a> {
    pub name: &'a str,
    pub input: &'a str,
    pub retrieval_context: &'a [String],
    pub rubric: &'a Rubric,
    pub evaluation_steps: &'a [String],
    pub criteria: &'a str,
    /// Minimum normalized score counted as a pass.
    pub threshold: f64,
}

/// Judge output on a 0-1 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct RubricVerdict {
    pub score: f64,
    pub reason: String,
    /// `score >= threshold`.
    pub success: bool,
}

#[async_trait]
pub trait RubricEvaluator: Send + Sync {
    async fn evaluate(&self, case: &EvaluationCase<'_>) -> Result<RubricVerdict, EvalError>;
}

/// [`RubricEvaluator`] backed by a [`LanguageModel`]; one `generate` call per evaluation.
pub struct GEvalEvaluator {
    model: Arc<dyn LanguageModel>,
}

impl GEvalEvaluator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl RubricEvaluator for GEvalEvaluator {
    async fn evaluate(&self, case: &EvaluationCase<'_>) -> Result<RubricVerdict, EvalError> {
        let prompt = build_prompt(case);
        let reply = self.model.generate(&prompt).await?;
        let raw = parse_reply(&reply)?;

        if !raw.score.is_finite() || !(0.0..=10.0).contains(&raw.score) {
            return Err(EvalError::ScoreOutOfRange(raw.score));
        }
        if raw.score.fract() != 0.0 {
            return Err(EvalError::MalformedReply(format!(
                "score {} is not an integer",
                raw.score
            )));
        }
        let reason = raw.reason.trim();
        if reason.is_empty() {
            return Err(EvalError::MalformedReply("reply has no reason".to_string()));
        }
        let Some(tier) = case.rubric.tier_for(raw.score as u8) else {
            return Err(EvalError::MalformedReply(format!(
                "score {} matches no rubric tier",
                raw.score
            )));
        };
        let score = raw.score / 10.0;
        debug!(
            metric = case.name,
            model = self.model.model_name(),
            raw_score = raw.score,
            tier = %format!("{}-{}", tier.lo, tier.hi),
            "rubric evaluation"
        );

        Ok(RubricVerdict {
            score,
            reason: reason.to_string(),
            success: score >= case.threshold,
        })
    }
}

fn build_prompt(case: &EvaluationCase<'_>) -> String {
    let steps = case
        .evaluation_steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an evaluator scoring an input for the metric \"{name}\".\n\
         Use only the retrieval context as evidence.\n\
         \n\
         Evaluation Criteria:\n\
         {criteria}\n\
         \n\
         Evaluation Steps:\n\
         {steps}\n\
         \n\
         Rubric (score range: expected outcome):\n\
         {rubric}\n\
         \n\
         Input:\n\
         {input}\n\
         \n\
         Retrieval Context:\n\
         {context}\n\
         \n\
         Respond ONLY with a JSON object. No markdown fences, no explanation, just raw JSON:\n\
         {{\"score\": <integer from 0 to 10>, \"reason\": \"<justification in the language of the input>\"}}",
        name = case.name,
        criteria = case.criteria.trim(),
        rubric = case.rubric.render(),
        input = case.input,
        context = case.retrieval_context.join("\n\n"),
    )
}

#[derive(Deserialize)]
struct RawVerdict {
    score: f64,
    reason: String,
}

/// Parse the outermost `{...}` span, tolerating code fences or chatter around it.
fn parse_reply(reply: &str) -> Result<RawVerdict, EvalError> {
    let span = match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => &reply[start..=end],
        _ => return Err(EvalError::MalformedReply(preview(reply))),
    };
    serde_json::from_str(span).map_err(|e| EvalError::MalformedReply(format!("{e}: {}", preview(reply))))
}

fn preview(reply: &str) -> String {
    reply.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LlmError;
    use std::sync::Mutex;

    struct ScriptedModel {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    async fn run(reply: &str) -> (Result<RubricVerdict, EvalError>, Vec<String>) {
        let model = ScriptedModel::new(reply);
        let evaluator = GEvalEvaluator::new(model.clone());
        let rubric = Rubric::contract_safety();
        let context = vec!["=== [관련 법령] ===\n퇴직금".to_string()];
        let steps = vec!["조항을 읽는다.".to_string(), "법령과 대조한다.".to_string()];
        let case = EvaluationCase {
            name: "Contract Safety Score",
            input: "퇴직금을 포기한다",
            retrieval_context: &context,
            rubric: &rubric,
            evaluation_steps: &steps,
            criteria: "근로자에게 불리한가?",
            threshold: 0.6,
        };
        let result = evaluator.evaluate(&case).await;
        let prompts = model.prompts.lock().unwrap().clone();
        (result, prompts)
    }

    #[tokio::test]
    async fn normalizes_score_and_applies_threshold() {
        let (result, prompts) = run(r#"{"score": 2, "reason": "퇴직금 사전 포기는 무효"}"#).await;
        let verdict = result.unwrap();
        assert_eq!(verdict.score, 0.2);
        assert_eq!(verdict.reason, "퇴직금 사전 포기는 무효");
        assert!(!verdict.success);
        assert_eq!(prompts.len(), 1);
    }

    #[tokio::test]
    async fn threshold_is_inclusive() {
        let (result, _) = run(r#"{"score": 6, "reason": "ok"}"#).await;
        assert!(result.unwrap().success);
    }

    #[tokio::test]
    async fn prompt_carries_every_part() {
        let (_, prompts) = run(r#"{"score": 9, "reason": "ok"}"#).await;
        let prompt = &prompts[0];
        assert!(prompt.contains("Contract Safety Score"));
        assert!(prompt.contains("근로자에게 불리한가?"));
        assert!(prompt.contains("1. 조항을 읽는다.\n2. 법령과 대조한다."));
        assert!(prompt.contains("0-2: "));
        assert!(prompt.contains("8-10: "));
        assert!(prompt.contains("퇴직금을 포기한다"));
        assert!(prompt.contains("=== [관련 법령] ===\n퇴직금"));
    }

    #[tokio::test]
    async fn tolerates_code_fences() {
        let (result, _) = run("```json\n{\"score\": 8, \"reason\": \"적법\"}\n```").await;
        assert_eq!(result.unwrap().score, 0.8);
    }

    #[tokio::test]
    async fn out_of_range_score_rejected() {
        let (result, _) = run(r#"{"score": 11, "reason": "?"}"#).await;
        assert!(matches!(result, Err(EvalError::ScoreOutOfRange(s)) if s == 11.0));
    }

    #[tokio::test]
    async fn score_outside_every_tier_rejected() {
        use clausewatch_core::RubricTier;

        let model = ScriptedModel::new(r#"{"score": 5, "reason": "중간"}"#);
        let evaluator = GEvalEvaluator::new(model);
        let rubric = Rubric::new(vec![
            RubricTier::new(0, 3, "unsafe"),
            RubricTier::new(7, 10, "safe"),
        ]);
        let case = EvaluationCase {
            name: "gap",
            input: "x",
            retrieval_context: &[],
            rubric: &rubric,
            evaluation_steps: &[],
            criteria: "c",
            threshold: 0.6,
        };
        let result = evaluator.evaluate(&case).await;
        assert!(matches!(result, Err(EvalError::MalformedReply(_))));
    }

    #[tokio::test]
    async fn fractional_score_rejected() {
        let (result, _) = run(r#"{"score": 6.5, "reason": "애매함"}"#).await;
        assert!(matches!(result, Err(EvalError::MalformedReply(_))));
    }

    #[tokio::test]
    async fn reason_is_required() {
        let (result, _) = run(r#"{"score": 6}"#).await;
        assert!(matches!(result, Err(EvalError::MalformedReply(_))));

        let (result, _) = run(r#"{"score": 6, "reason": "   "}"#).await;
        assert!(matches!(result, Err(EvalError::MalformedReply(_))));
    }

    #[tokio::test]
    async fn integral_float_score_accepted() {
        let (result, _) = run(r#"{"score": 7.0, "reason": " 대체로 적법 "}"#).await;
        let verdict = result.unwrap();
        assert_eq!(verdict.score, 0.7);
        assert_eq!(verdict.reason, "대체로 적법");
    }

    #[tokio::test]
    async fn non_json_reply_rejected() {
        let (result, _) = run("I think this clause is unfair.").await;
        assert!(matches!(result, Err(EvalError::MalformedReply(_))));

        let (result, _) = run(r#"{"reason": "no score"}"#).await;
        assert!(matches!(result, Err(EvalError::MalformedReply(_))));
    }
}
