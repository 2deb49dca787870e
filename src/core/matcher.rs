use std::sync::Arc;

use crate::core::{questions::Questionnaire, scoring::calculate_match_score};
use crate::models::{MatchResult, PreferenceProfile, RankOptions, RankWarning, Ranking, ScoringWeights, Vehicle};

/// Ranking orchestrator: score, threshold, sort, truncate
///
/// # Pipeline Stages
/// 1. Score every candidate against the profile
/// 2. Drop candidates under the minimum match percentage
/// 3. Stable sort by match percentage, descending
/// 4. Keep the top N
#[derive(Debug, Clone)]
pub struct RankingEngine {
    questionnaire: Arc<Questionnaire>,
    weights: ScoringWeights,
}

impl RankingEngine {
    pub fn new(questionnaire: Arc<Questionnaire>, weights: ScoringWeights) -> Self {
        Self {
            questionnaire,
            weights,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(Arc::new(Questionnaire::default()), ScoringWeights::default())
    }

    pub fn questionnaire(&self) -> &Arc<Questionnaire> {
        &self.questionnaire
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank vehicles for a (possibly partial) preference profile
    ///
    /// # Arguments
    /// * `profile` - Answers collected so far; unanswered criteria are neutral
    /// * `candidates` - Catalog snapshot, left untouched
    /// * `options` - Minimum match percentage and result count
    ///
    /// # Returns
    /// Ranking with at most `options.top_n` matches; ties keep catalog order
    pub fn rank(
        &self,
        profile: &PreferenceProfile,
        candidates: &[Vehicle],
        options: &RankOptions,
    ) -> Ranking {
        let total_candidates = candidates.len();

        if candidates.is_empty() {
            tracing::debug!("Ranking requested over an empty catalog");
            return Ranking {
                matches: Vec::new(),
                total_candidates,
                warning: Some(RankWarning::EmptyCandidateSet),
            };
        }

        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .filter_map(|vehicle| {
                let (match_percentage, reasons) =
                    calculate_match_score(vehicle, profile, &self.questionnaire, &self.weights);

                if match_percentage >= options.min_match_percentage {
                    Some(MatchResult {
                        vehicle: vehicle.clone(),
                        match_percentage,
                        reasons,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable, equal scores keep catalog order
        matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        matches.truncate(options.top_n);

        tracing::debug!(
            "Ranked {} candidates, {} above {}%",
            total_candidates,
            matches.len(),
            options.min_match_percentage
        );

        Ranking {
            matches,
            total_candidates,
            warning: None,
        }
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
