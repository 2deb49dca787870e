use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::models::quiz::Dimension;

/// Vehicle listing as supplied by the external listing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub year: Option<u16>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub seats: Option<u32>,
    #[serde(rename = "type", default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub km_driven: Option<u64>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Listing backends send numbers as JSON numbers or as text like "6,00,000".
/// A value that cannot be read as a number becomes `None` so only the
/// criterion depending on it goes unmatched.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    let value = Option::<NumberOrText<T>>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(text)) => text.trim().replace(',', "").parse().ok(),
        Some(NumberOrText::Other(_)) | None => None,
    })
}

impl Vehicle {
    /// Display name built from brand, model and variant
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.brand, &self.model, &self.variant]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            self.id.clone()
        } else {
            parts.join(" ")
        }
    }

    /// Case-insensitive feature lookup
    pub fn has_feature(&self, feature: &str) -> bool {
        let wanted = feature.trim();
        self.features
            .iter()
            .any(|f| f.trim().eq_ignore_ascii_case(wanted))
    }
}

/// Scored vehicle returned by a ranking call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub vehicle: Vehicle,
    pub match_percentage: u8,
    pub reasons: Vec<String>,
}

/// Non-fatal conditions reported alongside a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankWarning {
    EmptyCandidateSet,
}

/// Outcome of a ranking call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warning: Option<RankWarning>,
}

/// Threshold and size of a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankOptions {
    pub min_match_percentage: u8,
    pub top_n: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            min_match_percentage: 40,
            top_n: 5,
        }
    }
}

/// Near-match band for a dimension.
///
/// `tolerance` widens the accepted range by that fraction on both ends,
/// `credit` is the share of the dimension weight awarded inside the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialCredit {
    pub tolerance: f64,
    pub credit: f64,
}

/// Point weights per scoring dimension, summing to 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub budget: f64,
    pub seating: f64,
    pub body_type: f64,
    pub fuel: f64,
    pub features: f64,
    /// Budget is the only dimension with a near-match band
    pub budget_partial: Option<PartialCredit>,
}

impl ScoringWeights {
    pub fn weight_for(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Budget => self.budget,
            Dimension::Seating => self.seating,
            Dimension::BodyType => self.body_type,
            Dimension::Fuel => self.fuel,
            Dimension::Features => self.features,
        }
    }

    pub fn partial_credit_for(&self, dimension: Dimension) -> Option<PartialCredit> {
        match dimension {
            Dimension::Budget => self.budget_partial,
            _ => None,
        }
    }

    pub fn total(&self) -> f64 {
        self.budget + self.seating + self.body_type + self.fuel + self.features
    }

    /// Check the weights form a 100 point scale.
    /// Returns all problems at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("budget", self.budget),
            ("seating", self.seating),
            ("body_type", self.body_type),
            ("fuel", self.fuel),
            ("features", self.features),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("scoring.weights.{}: must be a non-negative number", name));
            }
        }

        if (self.total() - 100.0).abs() > 1e-6 {
            errors.push(format!(
                "scoring.weights: must sum to 100, got {}",
                self.total()
            ));
        }

        if let Some(partial) = self.budget_partial {
            if !(0.0..=1.0).contains(&partial.tolerance) {
                errors.push("scoring.budget_partial.tolerance: must be within 0..=1".to_string());
            }
            if !(0.0..=1.0).contains(&partial.credit) {
                errors.push("scoring.budget_partial.credit: must be within 0..=1".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            budget: 35.0,
            seating: 15.0,
            body_type: 20.0,
            fuel: 15.0,
            features: 15.0,
            budget_partial: Some(PartialCredit {
                tolerance: 0.10,
                credit: 0.5,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_100() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.total(), 100.0);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let weights = ScoringWeights {
            budget: -5.0,
            seating: 15.0,
            body_type: 20.0,
            fuel: 15.0,
            features: 15.0,
            budget_partial: Some(PartialCredit {
                tolerance: 2.0,
                credit: 0.5,
            }),
        };

        let errors = weights.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("budget")));
        assert!(errors.iter().any(|e| e.contains("sum to 100")));
        assert!(errors.iter().any(|e| e.contains("tolerance")));
    }

    #[test]
    fn test_partial_credit_only_for_budget() {
        let weights = ScoringWeights::default();
        assert!(weights.partial_credit_for(Dimension::Budget).is_some());
        assert!(weights.partial_credit_for(Dimension::Seating).is_none());
        assert!(weights.partial_credit_for(Dimension::Features).is_none());
    }

    #[test]
    fn test_vehicle_deserializes_listing_shape() {
        let json = r#"{
            "id": "car-1",
            "brand": "Honda",
            "model": "City",
            "price": 600000,
            "seats": 5,
            "type": "Mid Size Sedan",
            "fuelType": "Petrol",
            "features": ["Power Windows", "ABS"]
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.body_type.as_deref(), Some("Mid Size Sedan"));
        assert_eq!(vehicle.fuel_type.as_deref(), Some("Petrol"));
        assert_eq!(vehicle.price, Some(600000.0));
        assert_eq!(vehicle.display_name(), "Honda City");
        assert!(vehicle.has_feature("abs"));
        assert!(vehicle.km_driven.is_none());
    }

    #[test]
    fn test_vehicle_reads_numbers_sent_as_text() {
        let json = r#"{
            "id": "car-2",
            "price": "6,00,000",
            "seats": " 7 ",
            "year": "2019",
            "kmDriven": "call dealer"
        }"#;

        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.price, Some(600000.0));
        assert_eq!(vehicle.seats, Some(7));
        assert_eq!(vehicle.year, Some(2019));
        assert!(vehicle.km_driven.is_none());
    }

    #[test]
    fn test_unreadable_number_only_clears_that_field() {
        let json = r#"{ "id": "car-3", "price": {"amount": 5}, "seats": null, "type": "SUV" }"#;

        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert!(vehicle.price.is_none());
        assert!(vehicle.seats.is_none());
        assert_eq!(vehicle.body_type.as_deref(), Some("SUV"));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let json = r#"{ "id": "car-9" }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.display_name(), "car-9");
        assert!(vehicle.features.is_empty());
    }
}
