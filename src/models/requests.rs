use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{PreferenceProfile, Vehicle};

/// Answer submitted for a quiz session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "criterion_id", rename = "criterionId")]
    pub criterion_id: String,
    #[validate(length(min = 1))]
    pub value: String,
}

/// Request to finish a quiz session and rank the catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ResultsRequest {
    #[serde(default, alias = "allow_partial", rename = "allowPartial")]
    pub allow_partial: bool,
    #[validate(range(max = 100))]
    #[serde(default, alias = "min_match_percentage", rename = "minMatchPercentage")]
    pub min_match_percentage: Option<u8>,
    #[validate(range(min = 1))]
    #[serde(default, alias = "top_n", rename = "topN")]
    pub top_n: Option<usize>,
}

/// Stateless ranking request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[serde(default)]
    pub profile: PreferenceProfile,
    /// Candidates to rank; the cached catalog is used when absent
    #[serde(default)]
    pub vehicles: Option<Vec<Vehicle>>,
    #[validate(range(max = 100))]
    #[serde(default, alias = "min_match_percentage", rename = "minMatchPercentage")]
    pub min_match_percentage: Option<u8>,
    #[validate(range(min = 1))]
    #[serde(default, alias = "top_n", rename = "topN")]
    pub top_n: Option<usize>,
}
