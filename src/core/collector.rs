use std::sync::Arc;
use thiserror::Error;

use crate::core::questions::Questionnaire;
use crate::models::{Answer, Criterion, PreferenceProfile, SelectionMode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("quiz is incomplete: {answered} of {total} criteria answered")]
    IncompleteQuiz { answered: usize, total: usize },

    #[error("unknown criterion: {0}")]
    InvalidCriterion(String),

    #[error("criterion '{criterion}' has no option '{value}'")]
    InvalidOption { criterion: String, value: String },

    #[error("quiz is already complete, reset to retake it")]
    QuizComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Active(usize),
    Complete,
}

/// Walks one user through the questionnaire and accumulates their answers
#[derive(Debug, Clone)]
pub struct PreferenceCollector {
    questionnaire: Arc<Questionnaire>,
    state: QuizState,
    profile: PreferenceProfile,
}

impl PreferenceCollector {
    pub fn new(questionnaire: Arc<Questionnaire>) -> Self {
        let state = initial_state(&questionnaire);
        Self {
            questionnaire,
            state,
            profile: PreferenceProfile::new(),
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn current_criterion(&self) -> Option<&Criterion> {
        match self.state {
            QuizState::Active(i) => self.questionnaire.get(i),
            QuizState::Complete => None,
        }
    }

    /// Answers recorded so far
    pub fn answers(&self) -> &PreferenceProfile {
        &self.profile
    }

    /// Record an answer.
    ///
    /// Single-choice answers replace any earlier one and move past the
    /// criterion. Multi-choice answers toggle the value and stay put.
    pub fn answer(&mut self, criterion_id: &str, value: &str) -> Result<(), QuizError> {
        if self.state == QuizState::Complete {
            return Err(QuizError::QuizComplete);
        }

        let index = self
            .questionnaire
            .position(criterion_id)
            .ok_or_else(|| QuizError::InvalidCriterion(criterion_id.to_string()))?;
        let criterion = &self.questionnaire.criteria()[index];

        if criterion.option(value).is_none() {
            return Err(QuizError::InvalidOption {
                criterion: criterion_id.to_string(),
                value: value.to_string(),
            });
        }
        let mode = criterion.selection_mode;

        match mode {
            SelectionMode::SingleChoice => {
                self.profile
                    .set(criterion_id, Answer::Single(value.to_string()));
                self.advance_from(index);
            }
            SelectionMode::MultiChoice => {
                self.profile.toggle(criterion_id, value);
            }
        }

        tracing::trace!("Answered {} = {} ({:?})", criterion_id, value, self.state);
        Ok(())
    }

    /// Confirm the current criterion and move on.
    ///
    /// A multi-choice criterion with nothing toggled is recorded as an
    /// explicit empty selection.
    pub fn proceed(&mut self) -> Result<(), QuizError> {
        let index = match self.state {
            QuizState::Active(i) => i,
            QuizState::Complete => return Err(QuizError::QuizComplete),
        };

        if let Some(criterion) = self.questionnaire.get(index) {
            if criterion.selection_mode == SelectionMode::MultiChoice
                && !self.profile.is_answered(&criterion.id)
            {
                let id = criterion.id.clone();
                self.profile.set(&id, Answer::Multi(Vec::new()));
            }
        }

        self.advance_from(index);
        Ok(())
    }

    /// Move past the current criterion without recording anything
    pub fn skip(&mut self) {
        if let QuizState::Active(i) = self.state {
            self.advance_from(i);
        }
    }

    pub fn go_back(&mut self) {
        if let QuizState::Active(i) = self.state {
            self.state = QuizState::Active(i.saturating_sub(1));
        }
    }

    pub fn go_forward(&mut self) {
        if let QuizState::Active(i) = self.state {
            let last = self.questionnaire.len().saturating_sub(1);
            self.state = QuizState::Active((i + 1).min(last));
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == QuizState::Complete
    }

    /// Hand over the answers.
    ///
    /// With `allow_partial` the answers gathered so far are returned even
    /// if the user never reached the end.
    pub fn finalize(&self, allow_partial: bool) -> Result<PreferenceProfile, QuizError> {
        if !self.is_complete() && !allow_partial {
            return Err(QuizError::IncompleteQuiz {
                answered: self.profile.len(),
                total: self.questionnaire.len(),
            });
        }

        Ok(self.profile.clone())
    }

    /// Start over with an empty profile
    pub fn reset(&mut self) {
        self.profile.clear();
        self.state = initial_state(&self.questionnaire);
    }

    fn advance_from(&mut self, index: usize) {
        self.state = if index + 1 >= self.questionnaire.len() {
            QuizState::Complete
        } else {
            QuizState::Active(index + 1)
        };
    }
}

fn initial_state(questionnaire: &Questionnaire) -> QuizState {
    if questionnaire.is_empty() {
        QuizState::Complete
    } else {
        QuizState::Active(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> PreferenceCollector {
        PreferenceCollector::new(Arc::new(Questionnaire::default()))
    }

    #[test]
    fn test_starts_at_first_criterion() {
        let quiz = collector();
        assert_eq!(quiz.state(), QuizState::Active(0));
        assert_eq!(quiz.current_criterion().map(|c| c.id.as_str()), Some("budget"));
        assert!(quiz.answers().is_empty());
    }

    #[test]
    fn test_single_choice_advances() {
        let mut quiz = collector();
        quiz.answer("budget", "400000-800000").unwrap();

        assert_eq!(quiz.state(), QuizState::Active(1));
        assert_eq!(
            quiz.answers().get("budget"),
            Some(&Answer::Single("400000-800000".to_string()))
        );
    }

    #[test]
    fn test_single_choice_replaces_previous_answer() {
        let mut quiz = collector();
        quiz.answer("budget", "0-400000").unwrap();
        quiz.go_back();
        quiz.answer("budget", "2500000+").unwrap();

        assert_eq!(
            quiz.answers().get("budget"),
            Some(&Answer::Single("2500000+".to_string()))
        );
        assert_eq!(quiz.state(), QuizState::Active(1));
    }

    #[test]
    fn test_multi_choice_toggles_without_advancing() {
        let mut quiz = collector();
        for _ in 0..4 {
            quiz.skip();
        }
        assert_eq!(quiz.state(), QuizState::Active(4));

        quiz.answer("features", "ABS").unwrap();
        quiz.answer("features", "Sunroof").unwrap();
        quiz.answer("features", "ABS").unwrap();

        assert_eq!(quiz.state(), QuizState::Active(4));
        assert_eq!(
            quiz.answers().get("features"),
            Some(&Answer::Multi(vec!["Sunroof".to_string()]))
        );

        quiz.proceed().unwrap();
        assert!(quiz.is_complete());
    }

    #[test]
    fn test_proceed_records_empty_multi_selection() {
        let mut quiz = collector();
        for _ in 0..4 {
            quiz.skip();
        }
        quiz.proceed().unwrap();

        assert!(quiz.is_complete());
        assert_eq!(quiz.answers().get("features"), Some(&Answer::Multi(vec![])));
    }

    #[test]
    fn test_go_back_at_start_is_noop() {
        let mut quiz = collector();
        quiz.go_back();
        assert_eq!(quiz.state(), QuizState::Active(0));
    }

    #[test]
    fn test_go_forward_stops_at_last_criterion() {
        let mut quiz = collector();
        for _ in 0..10 {
            quiz.go_forward();
        }
        assert_eq!(quiz.state(), QuizState::Active(4));
        assert!(!quiz.is_complete());
    }

    #[test]
    fn test_skip_leaves_criterion_unanswered() {
        let mut quiz = collector();
        quiz.skip();
        assert_eq!(quiz.state(), QuizState::Active(1));
        assert!(!quiz.answers().is_answered("budget"));
    }

    #[test]
    fn test_unknown_criterion_rejected() {
        let mut quiz = collector();
        let err = quiz.answer("colour", "red").unwrap_err();
        assert_eq!(err, QuizError::InvalidCriterion("colour".to_string()));
        assert_eq!(quiz.state(), QuizState::Active(0));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut quiz = collector();
        let err = quiz.answer("fuel", "Steam").unwrap_err();
        assert!(matches!(err, QuizError::InvalidOption { .. }));
        assert!(quiz.answers().is_empty());
    }

    #[test]
    fn test_finalize_requires_completion() {
        let mut quiz = collector();
        quiz.answer("budget", "any").unwrap();

        let err = quiz.finalize(false).unwrap_err();
        assert_eq!(err, QuizError::IncompleteQuiz { answered: 1, total: 5 });

        let partial = quiz.finalize(true).unwrap();
        assert_eq!(partial.len(), 1);
    }

    #[test]
    fn test_incomplete_error_counts_answers_not_skips() {
        let mut quiz = collector();
        quiz.skip();
        quiz.skip();
        quiz.answer("bodyType", "SUV").unwrap();

        let err = quiz.finalize(false).unwrap_err();
        assert_eq!(err, QuizError::IncompleteQuiz { answered: 1, total: 5 });
        assert_eq!(err.to_string(), "quiz is incomplete: 1 of 5 criteria answered");
    }

    #[test]
    fn test_complete_is_terminal_until_reset() {
        let mut quiz = collector();
        for _ in 0..5 {
            quiz.skip();
        }
        assert!(quiz.is_complete());

        quiz.go_back();
        quiz.go_forward();
        quiz.skip();
        assert!(quiz.is_complete());
        assert_eq!(quiz.answer("budget", "any"), Err(QuizError::QuizComplete));
        assert_eq!(quiz.proceed(), Err(QuizError::QuizComplete));

        quiz.reset();
        assert_eq!(quiz.state(), QuizState::Active(0));
        assert!(quiz.answers().is_empty());
    }

    #[test]
    fn test_empty_questionnaire_starts_complete() {
        let quiz = PreferenceCollector::new(Arc::new(Questionnaire::new(vec![]).unwrap()));
        assert!(quiz.is_complete());
        assert!(quiz.finalize(false).unwrap().is_empty());
    }
}
