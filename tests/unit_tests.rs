// Unit tests for Vehicle Match

use vehicle_match::core::{
    filters::{attribute_for, evaluate_weight, feature_coverage, Attribute, Fit},
    questions::{default_criteria, Questionnaire, NO_PREFERENCE},
    scoring::calculate_match_score,
};
use vehicle_match::models::{Answer, Dimension, PartialCredit, PreferenceProfile, ScoringWeights, Vehicle, Weight};

fn create_vehicle() -> Vehicle {
    Vehicle {
        id: "test".to_string(),
        brand: Some("Hyundai".to_string()),
        model: Some("Creta".to_string()),
        variant: Some("SX".to_string()),
        year: Some(2022),
        price: Some(1_200_000.0),
        seats: Some(5),
        body_type: Some("Compact SUV".to_string()),
        fuel_type: Some("Diesel".to_string()),
        transmission: Some("Automatic".to_string()),
        km_driven: Some(12_000),
        features: vec!["Sunroof".to_string(), "ABS".to_string(), "Airbags".to_string()],
        images: vec![],
    }
}

#[test]
fn test_budget_band_edges() {
    let band = Some(PartialCredit { tolerance: 0.10, credit: 0.5 });
    let weight = Weight::range(Some(800_000.0), Some(1_500_000.0));

    assert_eq!(evaluate_weight(&weight, Attribute::Number(Some(1_500_000.0)), band), Fit::Exact);
    assert_eq!(evaluate_weight(&weight, Attribute::Number(Some(1_640_000.0)), band), Fit::Near);
    assert_eq!(evaluate_weight(&weight, Attribute::Number(Some(1_660_000.0)), band), Fit::Miss);
    assert_eq!(evaluate_weight(&weight, Attribute::Number(Some(725_000.0)), band), Fit::Near);
}

#[test]
fn test_body_type_buckets() {
    let questionnaire = Questionnaire::default();
    let body = questionnaire.find("bodyType").unwrap();
    let vehicle = create_vehicle();
    let attribute = attribute_for(&vehicle, Dimension::BodyType);

    let suv = body.option("SUV").unwrap();
    let sedan = body.option("Sedan").unwrap();
    let any = body.option(NO_PREFERENCE).unwrap();

    assert_eq!(evaluate_weight(&suv.weight, attribute, None), Fit::Exact);
    assert_eq!(evaluate_weight(&sedan.weight, attribute, None), Fit::Miss);
    assert_eq!(evaluate_weight(&any.weight, attribute, None), Fit::Exact);
}

#[test]
fn test_seat_thresholds() {
    let questionnaire = Questionnaire::default();
    let seats = questionnaire.find("seats").unwrap();
    let vehicle = create_vehicle();
    let attribute = attribute_for(&vehicle, Dimension::Seating);

    assert_eq!(evaluate_weight(&seats.option("3-4").unwrap().weight, attribute, None), Fit::Exact);
    assert_eq!(evaluate_weight(&seats.option("5").unwrap().weight, attribute, None), Fit::Exact);
    assert_eq!(evaluate_weight(&seats.option("6+").unwrap().weight, attribute, None), Fit::Miss);
}

#[test]
fn test_feature_coverage_counts() {
    let vehicle = create_vehicle();
    let requested = vec!["Sunroof".to_string(), "Cruise Control".to_string(), "abs".to_string()];
    assert_eq!(feature_coverage(&requested, &vehicle), (2, 3));
}

#[test]
fn test_score_within_valid_range() {
    let questionnaire = Questionnaire::default();
    let weights = ScoringWeights::default();
    let vehicle = create_vehicle();

    for criterion in default_criteria() {
        for option in &criterion.options {
            let profile = PreferenceProfile::new().with(criterion.id.clone(), Answer::Single(option.value.clone()));
            let (score, reasons) = calculate_match_score(&vehicle, &profile, &questionnaire, &weights);

            assert!(score <= 100, "Score should be in valid range");
            assert!(reasons.len() <= 1);
        }
    }
}

#[test]
fn test_custom_weights_change_scale() {
    let questionnaire = Questionnaire::default();
    let weights = ScoringWeights {
        budget: 10.0,
        seating: 10.0,
        body_type: 10.0,
        fuel: 60.0,
        features: 10.0,
        budget_partial: None,
    };
    let profile = PreferenceProfile::new()
        .with("bodyType", Answer::Single("SUV".to_string()))
        .with("fuel", Answer::Single("Petrol".to_string()));

    let (score, _) = calculate_match_score(&create_vehicle(), &profile, &questionnaire, &weights);

    // body 10 of 10, fuel 0 of 60
    assert_eq!(score, 14);
}

#[test]
fn test_partial_credit_can_be_disabled() {
    let questionnaire = Questionnaire::default();
    let mut weights = ScoringWeights::default();
    let mut vehicle = create_vehicle();
    vehicle.price = Some(1_600_000.0);
    let profile = PreferenceProfile::new().with("budget", Answer::Single("800000-1500000".to_string()));

    let (with_band, _) = calculate_match_score(&vehicle, &profile, &questionnaire, &weights);
    weights.budget_partial = None;
    let (without_band, _) = calculate_match_score(&vehicle, &profile, &questionnaire, &weights);

    assert_eq!(with_band, 50);
    assert_eq!(without_band, 0);
}
