//! Vehicle Match - preference quiz and affinity ranking for dealership listings
//!
//! The library holds the quiz state machine and the weighted scoring model
//! used to rank a vehicle catalog against a user's answers, plus the thin
//! HTTP service that hosts them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{PreferenceCollector, QuizError, Questionnaire, RankingEngine};
pub use crate::models::{Answer, MatchResult, PreferenceProfile, RankOptions, Ranking, ScoringWeights, Vehicle};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let engine = RankingEngine::default();
        let ranking = engine.rank(&PreferenceProfile::new(), &[], &RankOptions::default());
        assert!(ranking.matches.is_empty());
    }
}
