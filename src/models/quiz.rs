use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scoring dimension a criterion feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Budget,
    Seating,
    BodyType,
    Fuel,
    Features,
}

impl Dimension {
    /// Evaluation order used for scoring and for the reasons list
    pub const ORDER: [Dimension; 5] = [
        Dimension::Budget,
        Dimension::Seating,
        Dimension::BodyType,
        Dimension::Fuel,
        Dimension::Features,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionMode {
    SingleChoice,
    MultiChoice,
}

/// Constraint an answer option encodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Weight {
    /// Inclusive numeric range, either end open
    Range { min: Option<f64>, max: Option<f64> },
    /// Value must be at least this much
    MinCapacity { min: u32 },
    /// Value must be one of these, case-insensitive
    Categories { values: Vec<String> },
    Any,
}

impl Weight {
    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Weight::Range { min, max }
    }

    pub fn categories<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Weight::Categories {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn accepts_all(&self) -> bool {
        matches!(self, Weight::Any)
    }
}

/// One selectable answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub value: String,
    pub weight: Weight,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>, weight: Weight) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            weight,
        }
    }
}

/// One quiz question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    pub id: String,
    pub prompt: String,
    pub selection_mode: SelectionMode,
    pub dimension: Dimension,
    pub options: Vec<AnswerOption>,
}

impl Criterion {
    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Recorded answer for one criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multi(Vec<String>),
}

impl Answer {
    pub fn values(&self) -> Vec<&str> {
        match self {
            Answer::Single(value) => vec![value.as_str()],
            Answer::Multi(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// Answers keyed by criterion id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceProfile {
    answers: BTreeMap<String, Answer>,
}

impl PreferenceProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, criterion_id: &str) -> Option<&Answer> {
        self.answers.get(criterion_id)
    }

    pub fn is_answered(&self, criterion_id: &str) -> bool {
        self.answers.contains_key(criterion_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.answers.iter()
    }

    /// Builder-style insert
    pub fn with(mut self, criterion_id: impl Into<String>, answer: Answer) -> Self {
        self.answers.insert(criterion_id.into(), answer);
        self
    }

    pub(crate) fn set(&mut self, criterion_id: &str, answer: Answer) {
        self.answers.insert(criterion_id.to_string(), answer);
    }

    /// Flip membership of `value` in a multi answer, creating it if needed
    pub(crate) fn toggle(&mut self, criterion_id: &str, value: &str) {
        let entry = self
            .answers
            .entry(criterion_id.to_string())
            .or_insert_with(|| Answer::Multi(Vec::new()));

        if let Answer::Single(previous) = entry {
            *entry = Answer::Multi(vec![previous.clone()]);
        }

        if let Answer::Multi(values) = entry {
            if let Some(pos) = values.iter().position(|v| v == value) {
                values.remove(pos);
            } else {
                values.push(value.to_string());
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.answers.clear();
    }
}
