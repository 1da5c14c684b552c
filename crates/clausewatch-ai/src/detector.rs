//! Toxic clause detection: retrieve → score → classify, plus remediation.

use std::sync::Arc;

use clausewatch_core::{DetectionResult, PassageSearch, classify};
use tracing::info;

use crate::{
    ClauseScorer, ContextRetriever, DetectError, GEvalEvaluator, LanguageModel, RubricEvaluator,
    SuggestionGenerator,
};

/// Chars of the clause echoed into logs.
const LOG_PREVIEW_CHARS: usize = 30;

/// Per-clause pipeline over injected corpora and a language model.
///
/// A `detect` call issues two corpus lookups and one scoring round-trip, in
/// that order. `suggest` adds one more round-trip for toxic clauses only.
pub struct ToxicClauseDetector {
    retriever: ContextRetriever,
    scorer: ClauseScorer,
    suggester: SuggestionGenerator,
}

impl ToxicClauseDetector {
    /// Score with a G-Eval judge on `model`, and use the same model for suggestions.
    pub fn new(
        model: Arc<dyn LanguageModel>,
        laws: Arc<dyn PassageSearch>,
        precedents: Arc<dyn PassageSearch>,
    ) -> Self {
        let evaluator = Arc::new(GEvalEvaluator::new(model.clone()));
        Self::with_evaluator(evaluator, model, laws, precedents)
    }

    pub fn with_evaluator(
        evaluator: Arc<dyn RubricEvaluator>,
        model: Arc<dyn LanguageModel>,
        laws: Arc<dyn PassageSearch>,
        precedents: Arc<dyn PassageSearch>,
    ) -> Self {
        info!(model = model.model_name(), "toxic clause detector ready");
        Self {
            retriever: ContextRetriever::new(laws, precedents),
            scorer: ClauseScorer::new(evaluator),
            suggester: SuggestionGenerator::new(model),
        }
    }

    pub async fn detect(&self, clause: &str) -> Result<DetectionResult, DetectError> {
        let preview: String = clause.chars().take(LOG_PREVIEW_CHARS).collect();
        info!(clause = %preview, "analysing clause");

        let context = self.retriever.retrieve(clause).await?.render();
        let assessment = self.scorer.score(clause, &context).await?;
        let verdict = classify(assessment.safety_score);

        info!(
            risk = verdict.risk_score,
            toxic = verdict.is_toxic,
            "clause classified"
        );
        Ok(DetectionResult {
            clause: clause.to_string(),
            is_toxic: verdict.is_toxic,
            risk_score: verdict.risk_score,
            reason: assessment.reason,
            context_used: context,
        })
    }

    pub async fn suggest(&self, result: &DetectionResult) -> Result<String, DetectError> {
        Ok(self.suggester.suggest(result).await?)
    }
}
