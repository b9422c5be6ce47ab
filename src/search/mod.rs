//! Fuzzy politician name search
//!
//! Each name is scored against the query with three signals (token set,
//! best substring, single-word containment); see [`ranking`] for the
//! weighting.

pub mod engine;
pub mod fuzzy;
pub mod ranking;


pub use engine::{SearchEngine, SearchResult};
pub use ranking::MatchScore;
