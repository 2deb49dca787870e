use std::collections::HashSet;
use thiserror::Error;

use crate::models::{AnswerOption, Criterion, Dimension, SelectionMode, Weight};

/// Value carried by every "no preference" option
pub const NO_PREFERENCE: &str = "any";

#[derive(Debug, Error)]
#[error("invalid questionnaire: {}", .0.join("; "))]
pub struct QuestionnaireError(pub Vec<String>);

/// Ordered set of quiz criteria
#[derive(Debug, Clone, PartialEq)]
pub struct Questionnaire {
    criteria: Vec<Criterion>,
}

impl Questionnaire {
    /// Build a questionnaire, rejecting definitions that break its invariants
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, QuestionnaireError> {
        let questionnaire = Self { criteria };
        questionnaire.validate()?;
        Ok(questionnaire)
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Criterion> {
        self.criteria.get(index)
    }

    pub fn position(&self, criterion_id: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c.id == criterion_id)
    }

    pub fn find(&self, criterion_id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == criterion_id)
    }

    /// Criteria feeding `dimension`, in quiz order
    pub fn for_dimension(&self, dimension: Dimension) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter().filter(move |c| c.dimension == dimension)
    }

    fn validate(&self) -> Result<(), QuestionnaireError> {
        let mut errors = Vec::new();
        let mut seen_ids = HashSet::new();

        for criterion in &self.criteria {
            if !seen_ids.insert(criterion.id.as_str()) {
                errors.push(format!("criterion '{}': duplicate id", criterion.id));
            }

            if criterion.options.is_empty() {
                errors.push(format!("criterion '{}': has no options", criterion.id));
            }

            let mut seen_values = HashSet::new();
            for option in &criterion.options {
                if !seen_values.insert(option.value.as_str()) {
                    errors.push(format!(
                        "criterion '{}': duplicate option value '{}'",
                        criterion.id, option.value
                    ));
                }

                if option.value == NO_PREFERENCE && !option.weight.accepts_all() {
                    errors.push(format!(
                        "criterion '{}': '{}' option must accept all values",
                        criterion.id, NO_PREFERENCE
                    ));
                }

                match &option.weight {
                    Weight::Range { min: Some(min), max: Some(max) } if min > max => {
                        errors.push(format!(
                            "criterion '{}', option '{}': range min {} exceeds max {}",
                            criterion.id, option.value, min, max
                        ));
                    }
                    Weight::Range { min: None, max: None } => {
                        errors.push(format!(
                            "criterion '{}', option '{}': range has no bounds, use Any",
                            criterion.id, option.value
                        ));
                    }
                    Weight::Categories { values } if values.is_empty() => {
                        errors.push(format!(
                            "criterion '{}', option '{}': empty category set",
                            criterion.id, option.value
                        ));
                    }
                    _ => {}
                }
            }

            if criterion.dimension == Dimension::Features
                && criterion.selection_mode != SelectionMode::MultiChoice
            {
                errors.push(format!(
                    "criterion '{}': features must be multi-choice",
                    criterion.id
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(QuestionnaireError(errors))
        }
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self {
            criteria: default_criteria(),
        }
    }
}

/// Stock dealership quiz: budget, seating, body type, fuel, features
pub fn default_criteria() -> Vec<Criterion> {
    vec![
        Criterion {
            id: "budget".to_string(),
            prompt: "What's your budget?".to_string(),
            selection_mode: SelectionMode::SingleChoice,
            dimension: Dimension::Budget,
            options: vec![
                AnswerOption::new("Under ₹4 Lakh", "0-400000", Weight::range(None, Some(400_000.0))),
                AnswerOption::new("₹4 - 8 Lakh", "400000-800000", Weight::range(Some(400_000.0), Some(800_000.0))),
                AnswerOption::new("₹8 - 15 Lakh", "800000-1500000", Weight::range(Some(800_000.0), Some(1_500_000.0))),
                AnswerOption::new("₹15 - 25 Lakh", "1500000-2500000", Weight::range(Some(1_500_000.0), Some(2_500_000.0))),
                AnswerOption::new("Above ₹25 Lakh", "2500000+", Weight::range(Some(2_500_000.0), None)),
                AnswerOption::new("No fixed budget", NO_PREFERENCE, Weight::Any),
            ],
        },
        Criterion {
            id: "seats".to_string(),
            prompt: "How many people usually travel with you?".to_string(),
            selection_mode: SelectionMode::SingleChoice,
            dimension: Dimension::Seating,
            options: vec![
                AnswerOption::new("Just me or one more", "1-2", Weight::MinCapacity { min: 2 }),
                AnswerOption::new("3 - 4 people", "3-4", Weight::MinCapacity { min: 4 }),
                AnswerOption::new("5 people", "5", Weight::MinCapacity { min: 5 }),
                AnswerOption::new("6 or more", "6+", Weight::MinCapacity { min: 6 }),
                AnswerOption::new("Doesn't matter", NO_PREFERENCE, Weight::Any),
            ],
        },
        Criterion {
            id: "bodyType".to_string(),
            prompt: "Which body style do you prefer?".to_string(),
            selection_mode: SelectionMode::SingleChoice,
            dimension: Dimension::BodyType,
            options: vec![
                AnswerOption::new(
                    "Hatchback",
                    "Hatchback",
                    Weight::categories(["Hatchback", "Premium Hatchback", "Compact Hatchback"]),
                ),
                AnswerOption::new(
                    "Sedan",
                    "Sedan",
                    Weight::categories(["Sedan", "Compact Sedan", "Mid Size Sedan", "Full Size Sedan"]),
                ),
                AnswerOption::new(
                    "SUV",
                    "SUV",
                    Weight::categories(["SUV", "Compact SUV", "Mid Size SUV", "Full Size SUV", "Crossover"]),
                ),
                AnswerOption::new("MUV / MPV", "MUV", Weight::categories(["MUV", "MPV", "Minivan"])),
                AnswerOption::new(
                    "Luxury",
                    "Luxury",
                    Weight::categories(["Luxury", "Luxury Sedan", "Luxury SUV", "Coupe", "Convertible"]),
                ),
                AnswerOption::new("Open to anything", NO_PREFERENCE, Weight::Any),
            ],
        },
        Criterion {
            id: "fuel".to_string(),
            prompt: "Preferred fuel type?".to_string(),
            selection_mode: SelectionMode::SingleChoice,
            dimension: Dimension::Fuel,
            options: vec![
                AnswerOption::new("Petrol", "Petrol", Weight::categories(["Petrol"])),
                AnswerOption::new("Diesel", "Diesel", Weight::categories(["Diesel"])),
                AnswerOption::new("CNG", "CNG", Weight::categories(["CNG", "Petrol + CNG"])),
                AnswerOption::new("Electric", "Electric", Weight::categories(["Electric", "EV"])),
                AnswerOption::new("Hybrid", "Hybrid", Weight::categories(["Hybrid", "Petrol Hybrid", "Strong Hybrid", "Mild Hybrid"])),
                AnswerOption::new("No preference", NO_PREFERENCE, Weight::Any),
            ],
        },
        Criterion {
            id: "features".to_string(),
            prompt: "Which features are must-haves?".to_string(),
            selection_mode: SelectionMode::MultiChoice,
            dimension: Dimension::Features,
            options: [
                "Power Windows",
                "ABS",
                "Airbags",
                "Sunroof",
                "Touchscreen",
                "Reverse Camera",
                "Cruise Control",
                "Alloy Wheels",
                "Automatic Climate Control",
                "Keyless Entry",
            ]
            .into_iter()
            .map(|feature| AnswerOption::new(feature, feature, Weight::categories([feature])))
            .collect(),
        },
    ]
}
