//! Ranking & Scoring System
//!
//! Combines the similarity signals from [`fuzzy`](super::fuzzy) into one
//! score per candidate.

use super::fuzzy::{partial_ratio, token_set_ratio, word_match};
use serde::Serialize;
use std::cmp::Ordering;

/// Scoring weights for the match signals
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    /// Weight of the word-order-insensitive token score
    pub token: f64,
    /// Weight of the best-substring score
    pub partial: f64,
    /// Weight of the single-word containment bonus
    pub word_bonus: f64,
    /// Candidates scoring below this are discarded
    pub min_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            token: 0.4,
            partial: 0.4,
            word_bonus: 0.2,
            min_score: 60.0,
        }
    }
}

/// Complete match score with all components
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    pub token_score: f64,
    pub partial_score: f64,
    pub word_bonus: f64,
    /// Weighted combination, in `[0, 100]` for weights summing to 1
    pub final_score: f64,
}

impl MatchScore {
    /// Score a normalized query against a normalized name
    pub fn calculate(query: &str, name: &str, weights: &ScoringWeights) -> Self {
        let token_score = token_set_ratio(query, name);
        let partial_score = partial_ratio(query, name);
        let word_bonus = if word_match(name, query) { 100.0 } else { 0.0 };

        let final_score = weights.token * token_score
            + weights.partial * partial_score
            + weights.word_bonus * word_bonus;

        Self {
            token_score,
            partial_score,
            word_bonus,
            final_score,
        }
    }

    pub fn passes(&self, weights: &ScoringWeights) -> bool {
        self.final_score >= weights.min_score
    }

    /// Highest score first
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other.final_score.total_cmp(&self.final_score)
    }
}
