//! Property tests for compounding and summaries

use proptest::prelude::*;
use purchasing_power::format::fixed2;
use purchasing_power::prelude::*;

/// Three years of monthly inflation starting 2020-01, some months missing
fn gappy_index(rates: &[Option<f64>]) -> RateIndex {
    let mut month = YearMonth::new(2020, 1).unwrap();
    let mut samples = Vec::new();
    for rate in rates {
        if let Some(rate) = rate {
            samples.push(Sample::new(month.year, month.month, *rate));
        }
        month = month.succ();
    }
    RateIndex::build(&TimeSeries::from_samples(Indicator::Inflation, samples).unwrap())
}

fn month_at(offset: usize) -> YearMonth {
    (0..offset).fold(YearMonth::new(2020, 1).unwrap(), |m, _| m.succ())
}

fn rates_strategy() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.8, -5.0f64..30.0), 36)
}

proptest! {
    #[test]
    fn extending_end_applies_only_the_new_month(
        rates in rates_strategy(),
        start in 0usize..20,
        len in 0usize..15,
    ) {
        let index = gappy_index(&rates);
        let start_month = month_at(start);
        let end_month = month_at(start + len);
        let next_month = end_month.succ();

        let range = DateRange::new(start_month, end_month).unwrap();
        let extended = DateRange::new(start_month, next_month).unwrap();

        let before = compound(&index, &range, CompoundMode::InclusiveEnd);
        let after = compound(&index, &extended, CompoundMode::InclusiveEnd);

        match index.lookup(next_month) {
            Some(rate) => {
                prop_assert_eq!(after.factor, before.factor * (1.0 + rate / 100.0));
                prop_assert_eq!(after.months_counted, before.months_counted + 1);
            }
            None => prop_assert_eq!(after, before),
        }
    }

    #[test]
    fn exclusive_end_equals_inclusive_of_previous_month(
        rates in rates_strategy(),
        start in 0usize..20,
        len in 1usize..15,
    ) {
        let index = gappy_index(&rates);
        let start_month = month_at(start);
        let end_month = month_at(start + len);

        let exclusive = compound(
            &index,
            &DateRange::new(start_month, end_month).unwrap(),
            CompoundMode::ExclusiveEnd,
        );
        let inclusive = compound(
            &index,
            &DateRange::new(start_month, end_month.pred()).unwrap(),
            CompoundMode::InclusiveEnd,
        );
        prop_assert_eq!(exclusive, inclusive);
    }

    #[test]
    fn total_change_survives_factor_round_trip(
        rates in rates_strategy(),
        start in 0usize..20,
        len in 0usize..15,
        amount in 1.0f64..1_000_000.0,
    ) {
        let index = gappy_index(&rates);
        let range = DateRange::new(month_at(start), month_at(start + len)).unwrap();
        let result = ConversionCalculator::default()
            .adjust_for_inflation(&index, amount, range)
            .unwrap();

        let rederived = (result.summary.factor() - 1.0) * 100.0;
        prop_assert_eq!(fixed2(result.summary.total_change_pct), fixed2(rederived));
    }

    #[test]
    fn no_months_means_zero_summary(
        start in 0usize..30,
        len in 0usize..6,
    ) {
        let index = gappy_index(&[None; 36]);
        let range = DateRange::new(month_at(start), month_at(start + len)).unwrap();
        let result = compound(&index, &range, CompoundMode::InclusiveEnd);

        prop_assert_eq!(result.months_counted, 0);
        prop_assert_eq!(result.factor, 1.0);
        prop_assert_eq!(summarize(&result), RateSummary::zero());
    }

    #[test]
    fn month_iteration_never_drifts(
        year in 1990i32..2030,
        month in 1u32..=12,
        len in 0usize..120,
    ) {
        let start = YearMonth::new(year, month).unwrap();
        let end = (0..len).fold(start, |m, _| m.succ());
        let range = DateRange::new(start, end).unwrap();

        let months: Vec<_> = range.iter(CompoundMode::InclusiveEnd).collect();
        prop_assert_eq!(months.len(), len + 1);
        prop_assert_eq!(months.first().copied(), Some(start));
        prop_assert_eq!(months.last().copied(), Some(end));
        prop_assert!(months.windows(2).all(|w| w[0].succ() == w[1]));
    }
}
