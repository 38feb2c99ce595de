//! Multi-category content search.
//!
//! A search fans out one bounded query per category, keeps the records whose
//! normalized display field contains the normalized term, and orders prefix
//! matches ahead of substring-only matches.

pub mod engine;
pub mod generation;
pub mod normalize;

pub use engine::{run_search, SearchConfig, SearchOutcome, SearchQuery, ScoredResult};
