use crate::core::filters::{attribute_for, evaluate_weight, feature_coverage, push_unique, Attribute, Fit};
use crate::core::questions::Questionnaire;
use crate::models::{AnswerOption, Criterion, Dimension, PreferenceProfile, ScoringWeights, Vehicle, Weight};

/// Most reasons attached to a single match
pub const MAX_REASONS: usize = 3;

/// Calculate a match percentage (0-100) and justification for a vehicle
///
/// Every answered criterion adds its dimension weight to the maximum and
/// earns full, partial or zero credit:
///
/// score = sum(awarded_c) / sum(weight_c) * 100   over answered criteria
///
/// Unanswered criteria are skipped entirely. With nothing answered the
/// percentage is 0.
pub fn calculate_match_score(
    vehicle: &Vehicle,
    profile: &PreferenceProfile,
    questionnaire: &Questionnaire,
    weights: &ScoringWeights,
) -> (u8, Vec<String>) {
    let mut score = 0.0;
    let mut max_score = 0.0;
    let mut reasons = Vec::new();

    for dimension in Dimension::ORDER {
        let weight = weights.weight_for(dimension);

        for criterion in questionnaire.for_dimension(dimension) {
            let Some(selected) = selected_options(criterion, profile) else {
                continue;
            };

            max_score += weight;

            let (credit, reason) = match dimension {
                Dimension::Features => score_features(&selected, vehicle),
                _ => score_constraint(dimension, &selected, vehicle, weights),
            };

            score += weight * credit;

            if let Some(reason) = reason {
                if reasons.len() < MAX_REASONS {
                    reasons.push(reason);
                }
            }
        }
    }

    let percentage = if max_score > 0.0 {
        (100.0 * score / max_score).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    (percentage, reasons)
}

/// Options the profile selected for `criterion`.
///
/// `None` means the criterion does not count: either unanswered, or every
/// submitted value is unknown to the criterion.
fn selected_options<'q>(
    criterion: &'q Criterion,
    profile: &PreferenceProfile,
) -> Option<Vec<&'q AnswerOption>> {
    let answer = profile.get(&criterion.id)?;
    let values = answer.values();

    let selected: Vec<&AnswerOption> = values
        .iter()
        .filter_map(|value| criterion.option(value))
        .collect();

    if selected.len() < values.len() {
        tracing::warn!(
            "Ignoring {} unknown value(s) for criterion {}",
            values.len() - selected.len(),
            criterion.id
        );
    }

    // An explicit empty feature selection still counts as answered
    if selected.is_empty() && (!values.is_empty() || criterion.dimension != Dimension::Features) {
        return None;
    }

    Some(selected)
}

/// Credit share (0-1) for a single-constraint dimension, best option wins
fn score_constraint(
    dimension: Dimension,
    selected: &[&AnswerOption],
    vehicle: &Vehicle,
    weights: &ScoringWeights,
) -> (f64, Option<String>) {
    let attribute = attribute_for(vehicle, dimension);
    let partial = weights.partial_credit_for(dimension);

    let best = selected
        .iter()
        .map(|option| (evaluate_weight(&option.weight, attribute, partial), *option))
        .max_by_key(|(fit, _)| *fit);

    match best {
        Some((Fit::Exact, option)) => (1.0, strong_reason(dimension, option, attribute)),
        Some((Fit::Near, _)) => (partial.map_or(0.0, |p| p.credit), None),
        _ => (0.0, None),
    }
}

/// Credit share (0-1) for the features dimension
fn score_features(selected: &[&AnswerOption], vehicle: &Vehicle) -> (f64, Option<String>) {
    let mut requested = Vec::new();
    for option in selected {
        if let Weight::Categories { values } = &option.weight {
            for value in values {
                push_unique(&mut requested, value);
            }
        }
    }

    if requested.is_empty() {
        return (1.0, None);
    }

    let (matched, total) = feature_coverage(&requested, vehicle);
    let credit = matched as f64 / total as f64;

    let reason = if matched == total {
        Some(if total == 1 {
            format!("Has {}", requested[0])
        } else {
            format!("Has all {} requested features", total)
        })
    } else if matched * 2 >= total {
        Some(format!("Has {} of {} requested features", matched, total))
    } else {
        None
    };

    (credit, reason)
}

fn strong_reason(dimension: Dimension, option: &AnswerOption, attribute: Attribute<'_>) -> Option<String> {
    if option.weight.accepts_all() {
        return None;
    }

    match (dimension, attribute) {
        (Dimension::Budget, _) => Some(format!("Priced within your {} budget", option.label)),
        (Dimension::Seating, Attribute::Number(Some(seats))) => Some(format!(
            "Seats {}, enough for {}",
            seats,
            option.label.to_lowercase()
        )),
        (Dimension::BodyType, Attribute::Category(Some(body))) => {
            Some(format!("{} matches your {} preference", body.trim(), option.label))
        }
        (Dimension::Fuel, Attribute::Category(Some(fuel))) => {
            Some(format!("Runs on {} as preferred", fuel.trim()))
        }
        _ => None,
    }
}
