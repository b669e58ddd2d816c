use criterion::{black_box, criterion_group, criterion_main, Criterion};
use purchasing_power::prelude::*;

fn monthly_inflation(years: i32) -> RateIndex {
    let samples = (0..years)
        .flat_map(|y| (1..=12).map(move |m| Sample::new(1950 + y, m, 1.0 + (m as f64) / 10.0)))
        .collect();
    RateIndex::build(&TimeSeries::from_samples(Indicator::Inflation, samples).unwrap())
}

fn benchmark_index_build(c: &mut Criterion) {
    let samples: Vec<Sample> = (0..75)
        .flat_map(|y| (1..=12).map(move |m| Sample::new(1950 + y, m, 2.5)))
        .collect();
    let series = TimeSeries::from_samples(Indicator::Inflation, samples).unwrap();

    c.bench_function("index_build_900_months", |b| {
        b.iter(|| RateIndex::build(black_box(&series)));
    });
}

fn benchmark_compound(c: &mut Criterion) {
    let index = monthly_inflation(75);
    let range = DateRange::new(
        YearMonth::new(1950, 1).unwrap(),
        YearMonth::new(2024, 12).unwrap(),
    )
    .unwrap();

    c.bench_function("compound_900_months", |b| {
        b.iter(|| compound(black_box(&index), black_box(&range), CompoundMode::InclusiveEnd));
    });
}

fn benchmark_adjust(c: &mut Criterion) {
    let index = monthly_inflation(75);
    let calc = ConversionCalculator::default();
    let range = DateRange::new(
        YearMonth::new(1990, 1).unwrap(),
        YearMonth::new(2020, 12).unwrap(),
    )
    .unwrap();

    c.bench_function("adjust_for_inflation_30_years", |b| {
        b.iter(|| calc.adjust_for_inflation(black_box(&index), black_box(1000.0), range));
    });
}

criterion_group!(benches, benchmark_index_build, benchmark_compound, benchmark_adjust);
criterion_main!(benches);
