//! Statute acquisition: registry lookups, document fetches, and article/precedent extraction.
//!
//! Every failure in this crate degrades to "no result" and is logged; nothing
//! here returns an error to the scoring pipeline.

pub mod articles;
mod error;
pub mod precedents;
mod xml;

pub use articles::extract_articles;
pub use error::RegistryError;
pub use precedents::extract_precedent;

#[cfg(feature = "http")]
pub mod corpus;
#[cfg(feature = "http")]
pub mod registry;

#[cfg(feature = "http")]
pub use corpus::{build_law_passages, build_precedent_passages};
#[cfg(feature = "http")]
pub use registry::{PrecedentSummary, RegistryClient, RegistryConfig, normalize_law_id};
