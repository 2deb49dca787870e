// Criterion benchmarks for Vehicle Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vehicle_match::core::{calculate_match_score, Questionnaire, RankingEngine};
use vehicle_match::models::{Answer, PreferenceProfile, RankOptions, ScoringWeights, Vehicle};

fn create_vehicle(id: usize) -> Vehicle {
    let bodies = ["Hatchback", "Mid Size Sedan", "Compact SUV", "MPV"];
    let fuels = ["Petrol", "Diesel", "CNG", "Electric"];

    Vehicle {
        id: id.to_string(),
        brand: Some("Brand".to_string()),
        model: Some(format!("Model {}", id)),
        variant: None,
        year: Some(2015 + (id % 10) as u16),
        price: Some(250_000.0 + (id % 40) as f64 * 50_000.0),
        seats: Some(4 + (id % 4) as u32),
        body_type: Some(bodies[id % bodies.len()].to_string()),
        fuel_type: Some(fuels[id % fuels.len()].to_string()),
        transmission: None,
        km_driven: Some((id * 1_000) as u64),
        features: vec!["ABS".to_string(), "Power Windows".to_string()],
        images: vec![],
    }
}

fn create_profile() -> PreferenceProfile {
    PreferenceProfile::new()
        .with("budget", Answer::Single("400000-800000".to_string()))
        .with("seats", Answer::Single("3-4".to_string()))
        .with("bodyType", Answer::Single("Sedan".to_string()))
        .with("fuel", Answer::Single("Petrol".to_string()))
        .with("features", Answer::Multi(vec!["ABS".to_string(), "Sunroof".to_string()]))
}

fn bench_match_score(c: &mut Criterion) {
    let questionnaire = Questionnaire::default();
    let weights = ScoringWeights::default();
    let profile = create_profile();
    let vehicle = create_vehicle(1);

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| {
            calculate_match_score(
                black_box(&vehicle),
                black_box(&profile),
                black_box(&questionnaire),
                black_box(&weights),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let engine = RankingEngine::with_default_weights();
    let profile = create_profile();
    let options = RankOptions::default();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000, 10_000].iter() {
        let candidates: Vec<Vehicle> = (0..*candidate_count).map(create_vehicle).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| engine.rank(black_box(&profile), black_box(&candidates), black_box(&options)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_match_score, bench_ranking);

criterion_main!(benches);
