// Core algorithm exports
pub mod collector;
pub mod filters;
pub mod matcher;
pub mod questions;
pub mod scoring;

pub use collector::{PreferenceCollector, QuizError, QuizState};
pub use filters::{attribute_for, evaluate_weight, feature_coverage, Attribute, Fit};
pub use matcher::RankingEngine;
pub use questions::{default_criteria, Questionnaire, QuestionnaireError, NO_PREFERENCE};
pub use scoring::calculate_match_score;
