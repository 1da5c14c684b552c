use thiserror::Error;

use clausewatch_core::CorpusError;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM API key is missing")]
    MissingCredential,

    #[cfg(feature = "gemini")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model returned no text")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("unparseable evaluation reply: {0}")]
    MalformedReply(String),

    #[error("evaluation score {0} outside 0-10")]
    ScoreOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum DetectError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("clause scoring failed: {0}")]
    Evaluation(#[from] EvalError),

    #[error("suggestion generation failed: {0}")]
    Llm(#[from] LlmError),
}
