use crate::models::{Dimension, PartialCredit, Vehicle, Weight};

/// How well a vehicle attribute satisfies one option's constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Fit {
    Miss,
    Near,
    Exact,
}

/// Vehicle attribute read for a dimension
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribute<'a> {
    Number(Option<f64>),
    Category(Option<&'a str>),
    Features(&'a [String]),
}

/// Pick the attribute `dimension` is scored on
#[inline]
pub fn attribute_for(vehicle: &Vehicle, dimension: Dimension) -> Attribute<'_> {
    match dimension {
        Dimension::Budget => Attribute::Number(vehicle.price),
        Dimension::Seating => Attribute::Number(vehicle.seats.map(f64::from)),
        Dimension::BodyType => Attribute::Category(vehicle.body_type.as_deref()),
        Dimension::Fuel => Attribute::Category(vehicle.fuel_type.as_deref()),
        Dimension::Features => Attribute::Features(&vehicle.features),
    }
}

/// Evaluate one constraint against one attribute.
///
/// A missing attribute misses every constraint except `Any`.
/// `partial` widens numeric bounds by its tolerance to produce `Near`.
#[inline]
pub fn evaluate_weight(
    weight: &Weight,
    attribute: Attribute<'_>,
    partial: Option<PartialCredit>,
) -> Fit {
    match (weight, attribute) {
        (Weight::Any, _) => Fit::Exact,

        (Weight::Range { min, max }, Attribute::Number(Some(value))) => {
            if within(value, *min, *max) {
                return Fit::Exact;
            }
            match partial {
                Some(band) if within(
                    value,
                    min.map(|m| m * (1.0 - band.tolerance)),
                    max.map(|m| m * (1.0 + band.tolerance)),
                ) => Fit::Near,
                _ => Fit::Miss,
            }
        }

        (Weight::MinCapacity { min }, Attribute::Number(Some(value))) => {
            let min = f64::from(*min);
            if value >= min {
                Fit::Exact
            } else {
                match partial {
                    Some(band) if value >= min * (1.0 - band.tolerance) => Fit::Near,
                    _ => Fit::Miss,
                }
            }
        }

        (Weight::Categories { values }, Attribute::Category(Some(category))) => {
            if contains_ignore_case(values, category) {
                Fit::Exact
            } else {
                Fit::Miss
            }
        }

        _ => Fit::Miss,
    }
}

/// Count how many requested features the vehicle lists.
/// Returns (matched, requested).
#[inline]
pub fn feature_coverage(requested: &[String], vehicle: &Vehicle) -> (usize, usize) {
    let matched = requested.iter().filter(|f| vehicle.has_feature(f)).count();
    (matched, requested.len())
}

/// Add `value` unless an equal one (ignoring case) is already present
pub fn push_unique(values: &mut Vec<String>, value: &str) {
    if !contains_ignore_case(values, value) {
        values.push(value.trim().to_string());
    }
}

#[inline]
fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

#[inline]
fn contains_ignore_case(values: &[String], wanted: &str) -> bool {
    let wanted = wanted.trim();
    values.iter().any(|v| v.trim().eq_ignore_ascii_case(wanted))
}
