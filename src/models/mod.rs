// Model exports
pub mod domain;
pub mod quiz;
pub mod requests;
pub mod responses;

pub use domain::{Vehicle, MatchResult, Ranking, RankWarning, RankOptions, ScoringWeights, PartialCredit};
pub use quiz::{Answer, AnswerOption, Criterion, Dimension, PreferenceProfile, SelectionMode, Weight};
pub use requests::{AnswerRequest, RankRequest, ResultsRequest};
pub use responses::{ErrorResponse, HealthResponse, RankResponse, SessionResponse};
