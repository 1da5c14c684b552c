//! Call-counting fakes shared by the pipeline tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clausewatch_core::{CorpusError, PassageSearch};

use crate::{EvalError, EvaluationCase, LanguageModel, LlmError, RubricEvaluator, RubricVerdict};

pub struct FakeCorpus {
    passages: Option<Vec<String>>,
    requests: Mutex<Vec<(String, usize)>>,
}

impl FakeCorpus {
    pub fn new(passages: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            passages: Some(passages.iter().map(|p| p.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            passages: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<(String, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PassageSearch for FakeCorpus {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<String>, CorpusError> {
        self.requests.lock().unwrap().push((query.to_string(), k));
        match &self.passages {
            Some(passages) => Ok(passages.iter().take(k).cloned().collect()),
            None => Err(CorpusError::Query("index offline".into())),
        }
    }
}

/// Replies from a queue; errors once the queue is empty.
pub struct FakeModel {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

/// Returns a fixed safety score and records the cases it saw.
pub struct FakeEvaluator {
    score: f64,
    seen: Mutex<Vec<(String, Vec<String>, f64)>>,
}

impl FakeEvaluator {
    pub fn new(score: f64) -> Arc<Self> {
        Arc::new(Self {
            score,
            seen: Mutex::new(Vec::new()),
        })
    }

    /// `(input, retrieval_context, threshold)` per evaluation.
    pub fn seen(&self) -> Vec<(String, Vec<String>, f64)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RubricEvaluator for FakeEvaluator {
    async fn evaluate(&self, case: &EvaluationCase<'_>) -> Result<RubricVerdict, EvalError> {
        self.seen.lock().unwrap().push((
            case.input.to_string(),
            case.retrieval_context.to_vec(),
            case.threshold,
        ));
        Ok(RubricVerdict {
            score: self.score,
            reason: format!("safety {}", self.score),
            success: self.score >= case.threshold,
        })
    }
}
