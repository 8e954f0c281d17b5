//! Derived statistics over one hunt's fetched holidays.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::fetcher::FetchOutcome;
use crate::models::{CountRule, CountryHolidays, MonthStats, UpcomingHoliday, MONTH_NAMES};

/// Knobs for building a [`Dashboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub rule: CountRule,
    pub upcoming_limit: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            rule: CountRule::default(),
            upcoming_limit: 5,
        }
    }
}

/// Score the successful outcomes, dropping the missing ones. Input order is kept.
pub fn country_holidays(outcomes: Vec<FetchOutcome>, rule: CountRule) -> Vec<CountryHolidays> {
    outcomes
        .into_iter()
        .filter_map(FetchOutcome::into_fetched)
        .map(|(country, holidays)| CountryHolidays::new(country, holidays, rule))
        .collect()
}

/// Countries by descending holiday count. Ties keep their input order.
pub fn leaderboard(mut countries: Vec<CountryHolidays>) -> Vec<CountryHolidays> {
    countries.sort_by(|a, b| b.holiday_count.cmp(&a.holiday_count));
    countries
}

/// Exactly twelve buckets, January first, counting every holiday.
pub fn month_stats(countries: &[CountryHolidays]) -> Vec<MonthStats> {
    let mut counts = [0usize; 12];
    for holiday in countries.iter().flat_map(|c| &c.holidays) {
        counts[holiday.date.month0() as usize] += 1;
    }

    MONTH_NAMES
        .into_iter()
        .zip(counts)
        .enumerate()
        .map(|(index, (month, count))| MonthStats {
            month,
            count,
            index,
        })
        .collect()
}

/// Busiest month. The earliest month wins a tie; `None` when nothing was counted.
pub fn party_month(stats: &[MonthStats]) -> Option<&MonthStats> {
    let max = stats.iter().map(|m| m.count).max()?;
    if max == 0 {
        return None;
    }
    stats.iter().find(|m| m.count == max)
}

/// Holidays on or after `today`, soonest first, at most `limit` of them.
pub fn upcoming(countries: &[CountryHolidays], today: NaiveDate, limit: usize) -> Vec<UpcomingHoliday> {
    let mut future: Vec<UpcomingHoliday> = countries
        .iter()
        .flat_map(|country| {
            country
                .holidays
                .iter()
                .filter(move |h| h.date >= today)
                .map(move |h| UpcomingHoliday {
                    date: h.date,
                    name: h.name.clone(),
                    country: country.name.clone(),
                    country_code: country.code.clone(),
                    days_until: (h.date - today).num_days(),
                    emoji: country.emoji.clone(),
                })
        })
        .collect();

    future.sort_by_key(|h| h.date);
    future.truncate(limit);
    future
}

/// One generation of everything the dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub year: i32,
    pub countries_requested: usize,
    pub rule: CountRule,
    pub leaderboard: Vec<CountryHolidays>,
    pub month_stats: Vec<MonthStats>,
    pub upcoming: Vec<UpcomingHoliday>,
    pub total_holidays: usize,
    pub generated_at: Option<NaiveDateTime>,
}

impl Dashboard {
    /// Dashboard with nothing in it: no leaderboard, twelve zero months.
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            countries_requested: 0,
            rule: CountRule::default(),
            leaderboard: Vec::new(),
            month_stats: month_stats(&[]),
            upcoming: Vec::new(),
            total_holidays: 0,
            generated_at: None,
        }
    }

    pub fn build(
        outcomes: Vec<FetchOutcome>,
        year: i32,
        now: NaiveDateTime,
        options: AggregateOptions,
    ) -> Self {
        let countries_requested = outcomes.len();
        let countries = country_holidays(outcomes, options.rule);

        let month_stats = month_stats(&countries);
        let upcoming = upcoming(&countries, now.date(), options.upcoming_limit);
        let total_holidays = countries.iter().map(|c| c.holidays.len()).sum();
        let leaderboard = leaderboard(countries);

        info!(
            year,
            requested = countries_requested,
            analyzed = leaderboard.len(),
            total_holidays,
            "dashboard built"
        );

        Self {
            year,
            countries_requested,
            rule: options.rule,
            leaderboard,
            month_stats,
            upcoming,
            total_holidays,
            generated_at: Some(now),
        }
    }

    pub fn champion(&self) -> Option<&CountryHolidays> {
        self.leaderboard.first()
    }

    pub fn party_month(&self) -> Option<&MonthStats> {
        party_month(&self.month_stats)
    }

    pub fn next_holiday(&self) -> Option<&UpcomingHoliday> {
        self.upcoming.first()
    }

    pub fn countries_analyzed(&self) -> usize {
        self.leaderboard.len()
    }

    pub fn countries_failed(&self) -> usize {
        self.countries_requested.saturating_sub(self.leaderboard.len())
    }

    pub fn is_empty(&self) -> bool {
        self.leaderboard.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HolidayError;
    use crate::models::{Country, RawHoliday};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(day: NaiveDate) -> NaiveDateTime {
        day.and_hms_opt(12, 0, 0).unwrap()
    }

    fn scored(code: &str, count: usize) -> CountryHolidays {
        let holidays = (0..count)
            .map(|i| RawHoliday::new(date(2025, 1, 1) + chrono::Days::new(i as u64), "Day"))
            .collect();
        CountryHolidays::new(Country::from_code(code, code), holidays, CountRule::Raw)
    }

    fn fetched(code: &str, name: &str, dates: &[NaiveDate]) -> FetchOutcome {
        FetchOutcome::Fetched {
            country: Country::from_code(code, name),
            holidays: dates.iter().map(|d| RawHoliday::new(*d, "Holiday")).collect(),
        }
    }

    fn missing(code: &str) -> FetchOutcome {
        FetchOutcome::Missing {
            country: Country::from_code(code, code),
            reason: HolidayError::EmptyBody(code.to_string()),
        }
    }

    #[test]
    fn test_leaderboard_orders_descending() {
        let board = leaderboard(vec![scored("AA", 3), scored("BB", 10)]);
        let counts: Vec<usize> = board.iter().map(|c| c.holiday_count).collect();
        assert_eq!(counts, vec![10, 3]);
        assert_eq!(board[0].code, "BB");
    }

    #[test]
    fn test_leaderboard_ties_keep_order() {
        let board = leaderboard(vec![scored("AA", 5), scored("BB", 5), scored("CC", 7)]);
        let codes: Vec<&str> = board.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CC", "AA", "BB"]);
    }

    #[test]
    fn test_month_stats_always_twelve() {
        let countries = vec![
            CountryHolidays::new(
                Country::from_code("US", "United States"),
                vec![
                    RawHoliday::new(date(2025, 1, 1), "New Year"),
                    RawHoliday::new(date(2025, 12, 25), "Christmas"),
                ],
                CountRule::Raw,
            ),
            CountryHolidays::new(
                Country::from_code("GB", "United Kingdom"),
                vec![RawHoliday::new(date(2025, 12, 26), "Boxing Day")],
                CountRule::Raw,
            ),
        ];
        let stats = month_stats(&countries);
        assert_eq!(stats.len(), 12);
        assert_eq!(stats[0].count, 1);
        assert_eq!(stats[11].count, 2);
        assert_eq!(stats[5].count, 0);
        assert_eq!(stats[11].month, "December");
        assert_eq!(stats.iter().map(|m| m.index).collect::<Vec<_>>(), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_party_month_prefers_earliest_tie() {
        let mut stats = month_stats(&[]);
        assert!(party_month(&stats).is_none());

        stats[3].count = 4;
        stats[7].count = 4;
        stats[1].count = 2;
        assert_eq!(party_month(&stats).map(|m| m.month), Some("April"));
    }

    #[test]
    fn test_upcoming_filters_sorts_and_limits() {
        let today = date(2025, 6, 10);
        let countries = vec![
            CountryHolidays::new(
                Country::from_code("FR", "France"),
                vec![
                    RawHoliday::new(date(2025, 7, 14), "Bastille Day"),
                    RawHoliday::new(date(2025, 5, 1), "Labour Day"),
                ],
                CountRule::Raw,
            ),
            CountryHolidays::new(
                Country::from_code("US", "United States"),
                vec![
                    RawHoliday::new(date(2025, 6, 10), "Today Day"),
                    RawHoliday::new(date(2025, 7, 4), "Independence Day"),
                    RawHoliday::new(date(2025, 6, 19), "Juneteenth"),
                ],
                CountRule::Raw,
            ),
        ];

        let list = upcoming(&countries, today, 3);
        let names: Vec<&str> = list.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Today Day", "Juneteenth", "Independence Day"]);
        assert_eq!(list[0].days_until, 0);
        assert!(list[0].is_today());
        assert_eq!(list[1].days_until, 9);
        assert_eq!(list[2].emoji, "🇺🇸");
        assert_eq!(list[2].country, "United States");
    }

    #[test]
    fn test_dashboard_drops_missing_countries() {
        let today = date(2025, 3, 1);
        let outcomes = vec![
            fetched("DE", "Germany", &[date(2025, 10, 3), date(2025, 12, 25)]),
            missing("XX"),
            fetched("JP", "Japan", &[date(2025, 1, 1), date(2025, 5, 5), date(2025, 11, 3)]),
        ];
        let dashboard = Dashboard::build(outcomes, 2025, noon(today), AggregateOptions::default());

        assert_eq!(dashboard.countries_requested, 3);
        assert_eq!(dashboard.countries_analyzed(), 2);
        assert_eq!(dashboard.countries_failed(), 1);
        assert_eq!(dashboard.total_holidays, 5);
        assert_eq!(dashboard.champion().map(|c| c.code.as_str()), Some("JP"));
        assert_eq!(dashboard.next_holiday().map(|h| h.name.as_str()), Some("Holiday"));
        assert_eq!(dashboard.next_holiday().map(|h| h.country_code.as_str()), Some("JP"));
        assert_eq!(dashboard.upcoming.len(), 4);
    }

    #[test]
    fn test_days_off_rule_changes_ranking_not_totals() {
        // 2025-01-04 and 2025-01-05 are a weekend
        let outcomes = vec![
            fetched("AA", "Weekendland", &[date(2025, 1, 4), date(2025, 1, 5), date(2025, 1, 6)]),
            fetched("BB", "Weekdayland", &[date(2025, 1, 7), date(2025, 1, 8)]),
        ];
        let options = AggregateOptions {
            rule: CountRule::DaysOff,
            upcoming_limit: 20,
        };
        let dashboard = Dashboard::build(outcomes, 2025, noon(date(2025, 1, 1)), options);

        assert_eq!(dashboard.leaderboard[0].code, "BB");
        assert_eq!(dashboard.leaderboard[0].holiday_count, 2);
        assert_eq!(dashboard.leaderboard[1].holiday_count, 1);
        assert_eq!(dashboard.total_holidays, 5);
        assert_eq!(dashboard.month_stats[0].count, 5);
    }

    #[test]
    fn test_empty_corpus() {
        let dashboard = Dashboard::build(
            vec![missing("US")],
            2025,
            noon(date(2025, 1, 1)),
            AggregateOptions::default(),
        );
        assert!(dashboard.is_empty());
        assert!(dashboard.upcoming.is_empty());
        assert!(dashboard.champion().is_none());
        assert!(dashboard.party_month().is_none());
        assert!(dashboard.next_holiday().is_none());
        assert_eq!(dashboard.month_stats.len(), 12);
        assert!(dashboard.month_stats.iter().all(|m| m.count == 0));

        let empty = Dashboard::empty(2025);
        assert_eq!(empty.month_stats.len(), 12);
        assert_eq!(empty.total_holidays, 0);
    }

    fn arb_outcomes() -> impl Strategy<Value = Vec<(bool, Vec<u32>)>> {
        prop::collection::vec((any::<bool>(), prop::collection::vec(0u32..365, 0..30)), 0..12)
    }

    fn to_outcomes(cases: &[(bool, Vec<u32>)]) -> Vec<FetchOutcome> {
        cases.iter()
            .enumerate()
            .map(|(i, (ok, days))| {
                let code = format!("C{}", i);
                if *ok {
                    let dates: Vec<NaiveDate> = days
                        .iter()
                        .map(|d| date(2025, 1, 1) + chrono::Days::new(*d as u64))
                        .collect();
                    fetched(&code, &code, &dates)
                } else {
                    missing(&code)
                }
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_leaderboard_sorted_and_bounded(cases in arb_outcomes(), raw in any::<bool>()) {
            let rule = if raw { CountRule::Raw } else { CountRule::DaysOff };
            let input_len = cases.len();
            let board = leaderboard(country_holidays(to_outcomes(&cases), rule));
            prop_assert!(board.len() <= input_len);
            prop_assert!(board.windows(2).all(|w| w[0].holiday_count >= w[1].holiday_count));
        }

        #[test]
        fn prop_month_counts_sum_to_total(cases in arb_outcomes()) {
            let dashboard = Dashboard::build(
                to_outcomes(&cases),
                2025,
                noon(date(2025, 1, 1)),
                AggregateOptions::default(),
            );
            let expected: usize = cases.iter().filter(|(ok, _)| *ok).map(|(_, d)| d.len()).sum();
            prop_assert_eq!(dashboard.month_stats.len(), 12);
            prop_assert_eq!(dashboard.month_stats.iter().map(|m| m.count).sum::<usize>(), expected);
            prop_assert_eq!(dashboard.total_holidays, expected);
        }

        #[test]
        fn prop_upcoming_sorted_non_negative(cases in arb_outcomes(), offset in 0u64..365, limit in 0usize..25) {
            let today = date(2025, 1, 1) + chrono::Days::new(offset);
            let countries = country_holidays(to_outcomes(&cases), CountRule::Raw);
            let list = upcoming(&countries, today, limit);
            prop_assert!(list.len() <= limit);
            prop_assert!(list.iter().all(|h| h.days_until >= 0 && h.date >= today));
            prop_assert!(list.windows(2).all(|w| w[0].date <= w[1].date));
        }

        #[test]
        fn prop_ties_are_stable(counts in prop::collection::vec(0usize..4, 0..10)) {
            let countries: Vec<CountryHolidays> = counts
                .iter()
                .enumerate()
                .map(|(i, c)| scored(&format!("{:02}", i), *c))
                .collect();
            let board = leaderboard(countries);
            for pair in board.windows(2) {
                if pair[0].holiday_count == pair[1].holiday_count {
                    prop_assert!(pair[0].code < pair[1].code);
                }
            }
        }
    }
}
