use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::models::{DailyRecord, Environment, Filters, Team};
use crate::rng::SequenceGenerator;

/// Builds one record per day, oldest first, ending on `today`.
///
/// Every day draws six values from `generator` in a fixed order, so the
/// output depends on the generator state at entry. A zero-day window makes
/// no draws.
pub fn build_series(
    generator: &mut SequenceGenerator,
    days: u32,
    filters: Filters,
    today: NaiveDate,
) -> DashboardResult<Vec<DailyRecord>> {
    debug!(
        days,
        team = %filters.team,
        environment = %filters.environment,
        state = generator.state(),
        "building daily series"
    );

    let Some(oldest) = oldest_date(today, days)? else {
        return Ok(Vec::new());
    };

    let mut series = Vec::with_capacity(days as usize);
    for index in 0..days {
        let date = oldest + Duration::days(index as i64);
        series.push(build_day(generator, date, filters));
    }

    Ok(series)
}

fn oldest_date(today: NaiveDate, days: u32) -> DashboardResult<Option<NaiveDate>> {
    if days == 0 {
        return Ok(None);
    }
    today
        .checked_sub_signed(Duration::days(days as i64 - 1))
        .map(Some)
        .ok_or(DashboardError::DateOutOfRange { today, days })
}

fn build_day(generator: &mut SequenceGenerator, date: NaiveDate, filters: Filters) -> DailyRecord {
    let sev1_max = if filters.team == Team::Payments { 2 } else { 1 };
    let uat_discount = if filters.environment == Environment::Uat { 1 } else { 0 };
    let sev2_max = if filters.team == Team::Mobile { 5 } else { 3 };

    let sev1 = (generator.next_in(0, sev1_max) - uat_discount).max(0);
    let sev2 = generator.next_in(0, sev2_max);
    let sev3 = generator.next_in(1, 8);
    let opened = sev1 + sev2 + sev3;
    let closed = (opened - generator.next_in(0, 3)).max(0);
    let tests = 80 + generator.next_in(0, 40);
    let pass_ratio = 0.75 + generator.next_in(0, 15) as f64 / 100.0;
    let passed = ((tests as f64 * pass_ratio).round() as i64).min(tests).max(0);

    DailyRecord {
        date,
        opened: opened as u32,
        closed: closed as u32,
        sev1: sev1 as u32,
        sev2: sev2 as u32,
        sev3: sev3 as u32,
        tests: tests as u32,
        passed: passed as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{default_generator, DEFAULT_SEED};
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    fn filters(team: Team, environment: Environment) -> Filters {
        Filters { team, environment }
    }

    #[test]
    fn first_core_staging_day_is_pinned() {
        let mut generator = default_generator();
        let series =
            build_series(&mut generator, 1, filters(Team::Core, Environment::Staging), today())
                .unwrap();

        assert_eq!(
            series,
            vec![DailyRecord {
                date: today(),
                opened: 8,
                closed: 7,
                sev1: 0,
                sev2: 2,
                sev3: 6,
                tests: 95,
                passed: 74,
            }]
        );
    }

    #[test]
    fn mobile_widens_the_sev2_range() {
        let mut generator = default_generator();
        let series =
            build_series(&mut generator, 1, filters(Team::Mobile, Environment::Staging), today())
                .unwrap();
        assert_eq!(series[0].sev2, 3);
    }

    #[test]
    fn each_day_consumes_six_draws() {
        let mut built = default_generator();
        build_series(&mut built, 3, filters(Team::Core, Environment::Staging), today()).unwrap();

        let mut manual = default_generator();
        for _ in 0..18 {
            manual.next_in(0, 1);
        }
        assert_eq!(built.state(), manual.state());
    }

    #[test]
    fn zero_days_makes_no_draws() {
        let mut generator = default_generator();
        let series =
            build_series(&mut generator, 0, filters(Team::Core, Environment::Staging), today())
                .unwrap();
        assert!(series.is_empty());
        assert_eq!(generator.state(), DEFAULT_SEED);
    }

    #[test]
    fn dates_are_consecutive_and_end_today() {
        let mut generator = default_generator();
        let series =
            build_series(&mut generator, 14, filters(Team::Platform, Environment::Production), today())
                .unwrap();

        assert_eq!(series.len(), 14);
        assert_eq!(series.last().unwrap().date, today());
        assert_eq!(series[0].date, today() - Duration::days(13));
        for pair in series.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[rstest]
    fn records_hold_their_invariants(
        #[values(Team::Core, Team::Payments, Team::Mobile, Team::Platform)] team: Team,
        #[values(Environment::Staging, Environment::Uat, Environment::Production)]
        environment: Environment,
    ) {
        let mut generator = SequenceGenerator::new(1234).unwrap();
        let series = build_series(&mut generator, 90, filters(team, environment), today()).unwrap();

        for record in &series {
            assert_eq!(record.opened, record.sev1 + record.sev2 + record.sev3);
            assert!(record.passed <= record.tests);
            assert!(record.closed <= record.opened);
            assert!((80..=120).contains(&record.tests));
            assert!((1..=8).contains(&record.sev3));
        }
    }

    #[test]
    fn uat_lowers_sev1_ceiling() {
        let mut generator = SequenceGenerator::new(99).unwrap();
        let series =
            build_series(&mut generator, 90, filters(Team::Core, Environment::Uat), today())
                .unwrap();
        assert!(series.iter().all(|record| record.sev1 == 0));
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let selection = filters(Team::Payments, Environment::Uat);
        let mut first = default_generator();
        let mut second = default_generator();
        assert_eq!(
            build_series(&mut first, 30, selection, today()).unwrap(),
            build_series(&mut second, 30, selection, today()).unwrap()
        );
    }

    #[test]
    fn reports_unrepresentable_dates() {
        let mut generator = default_generator();
        let result = build_series(
            &mut generator,
            u32::MAX,
            filters(Team::Core, Environment::Staging),
            NaiveDate::MIN,
        );
        assert!(matches!(result, Err(DashboardError::DateOutOfRange { .. })));
    }
}
