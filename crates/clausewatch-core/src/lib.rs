//! Core types, the scoring rubric, risk classification, and the corpus query seam.

pub mod corpus;
pub mod risk;
pub mod rubric;
pub mod types;

pub use corpus::{CorpusError, PassageSearch};
pub use risk::{RiskVerdict, TOXIC_RISK_CUTOFF, classify};
pub use rubric::{Rubric, RubricTier};
pub use types::{
    Article, ContextBlock, DetectionResult, LawIdentity, Passage, RawStatuteDocument,
};
