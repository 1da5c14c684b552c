//! LLM layer: model bridge, rubric evaluation, and the toxic clause detection pipeline.

mod detector;
mod error;
mod geval;
mod llm;
mod retriever;
mod scorer;
mod suggest;

#[cfg(test)]
mod testing;

#[cfg(feature = "gemini")]
mod gemini;
#[cfg(feature = "gemini")]
pub use gemini::{DEFAULT_MODEL, GeminiConfig, GeminiModel};

pub use detector::ToxicClauseDetector;
pub use error::{DetectError, EvalError, LlmError};
pub use geval::{EvaluationCase, GEvalEvaluator, RubricEvaluator, RubricVerdict};
pub use llm::LanguageModel;
pub use retriever::{ContextRetriever, LAW_TOP_K, PRECEDENT_TOP_K};
pub use scorer::{ClauseScorer, SAFETY_THRESHOLD, SafetyAssessment};
pub use suggest::{SAFE_CLAUSE_MESSAGE, SuggestionGenerator};
