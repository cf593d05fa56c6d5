use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{StatsError, StatsOutcome};

/// Shown whenever the contribution calendar can't be fetched or makes no sense.
pub const FALLBACK_SUMMARY: StatsSummary = StatsSummary {
    total: 599,
    this_week: 6,
    best: 50,
    average: 2.1,
};

const DAYS_PER_YEAR: f64 = 365.0;
const WEEK: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total: i64,
    pub this_week: i64,
    pub best: i64,
    pub average: f64,
}

/// Raw contribution calendar as served by the public contributions API.
#[derive(Debug, Default, Deserialize)]
pub struct ContributionCalendar {
    pub total: Option<ContributionTotals>,
    #[serde(default)]
    pub contributions: Vec<ContributionDay>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContributionTotals {
    #[serde(rename = "lastYear")]
    pub last_year: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContributionDay {
    pub date: String,
    #[serde(default)]
    pub count: i64,
}

impl ContributionDay {
    fn day(&self) -> Option<NaiveDate> {
        self.date.get(..10)?.parse().ok()
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregates a calendar into a summary, relative to `today`.
pub fn summarize(calendar: &ContributionCalendar, today: NaiveDate) -> StatsOutcome<StatsSummary> {
    let Some(totals) = &calendar.total else {
        return StatsOutcome::Fallback(FALLBACK_SUMMARY);
    };
    let total = totals.last_year.unwrap_or(0);

    // (today - 7 days, today]
    let week_start = today.checked_sub_days(Days::new(WEEK));
    let this_week = calendar
        .contributions
        .iter()
        .filter(|c| {
            c.day()
                .is_some_and(|d| d <= today && week_start.map_or(true, |start| d > start))
        })
        .fold(0i64, |sum, c| sum.saturating_add(c.count));

    let best = calendar
        .contributions
        .iter()
        .map(|c| c.count)
        .max()
        .unwrap_or(0);

    StatsOutcome::Ok(StatsSummary {
        total,
        this_week,
        best,
        average: round_one_decimal(total as f64 / DAYS_PER_YEAR),
    })
}

/// Turns a fetched body (or the reason there isn't one) into an outcome.
/// Every failure collapses to the fallback summary.
pub fn contribution_outcome(
    body: Result<String, StatsError>,
    today: NaiveDate,
) -> StatsOutcome<StatsSummary> {
    let calendar = body.and_then(|body| {
        serde_json::from_str::<ContributionCalendar>(&body).map_err(StatsError::from)
    });
    match calendar {
        Ok(calendar) => summarize(&calendar, today),
        Err(e) => {
            log::warn!("Using fallback contribution stats: {e}");
            StatsOutcome::Fallback(FALLBACK_SUMMARY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn days_ago(n: u64) -> String {
        today()
            .checked_sub_days(Days::new(n))
            .unwrap()
            .format("%Y-%m-%d")
            .to_string()
    }

    #[test]
    fn test_missing_total_falls_back() {
        let body = r#"{"contributions": [{"date": "2026-10-18", "count": 9}]}"#;
        let outcome = contribution_outcome(Ok(body.to_string()), today());
        assert_eq!(outcome, StatsOutcome::Fallback(FALLBACK_SUMMARY));

        let summary = outcome.data().unwrap();
        assert_eq!(
            (summary.total, summary.this_week, summary.best, summary.average),
            (599, 6, 50, 2.1)
        );
    }

    #[test]
    fn test_summary_from_calendar() {
        let body = format!(
            r#"{{
                "total": {{"lastYear": 105}},
                "contributions": [
                    {{"date": "{}", "count": 5, "level": 1}},
                    {{"date": "{}", "count": 100, "level": 4}}
                ]
            }}"#,
            days_ago(0),
            days_ago(400)
        );
        let outcome = contribution_outcome(Ok(body), today());
        assert_eq!(
            outcome,
            StatsOutcome::Ok(StatsSummary {
                total: 105,
                this_week: 5,
                best: 100,
                average: 0.3,
            })
        );
    }

    #[test]
    fn test_empty_contributions_best_is_zero() {
        let body = r#"{"total": {"lastYear": 0}, "contributions": []}"#;
        let outcome = contribution_outcome(Ok(body.to_string()), today());
        let summary = outcome.data().unwrap();
        assert_eq!(summary.best, 0);
        assert_eq!(summary.this_week, 0);
        assert!(!outcome.is_fallback());
    }

    #[test]
    fn test_missing_last_year_defaults_to_zero() {
        let body = r#"{"total": {"2025": 12}}"#;
        let outcome = contribution_outcome(Ok(body.to_string()), today());
        assert_eq!(outcome.data().map(|s| s.total), Some(0));
    }

    #[test]
    fn test_week_window_bounds() {
        let calendar = ContributionCalendar {
            total: Some(ContributionTotals { last_year: Some(40) }),
            contributions: vec![
                ContributionDay { date: days_ago(0), count: 1 },
                ContributionDay { date: days_ago(6), count: 2 },
                // exactly seven days back is outside the window
                ContributionDay { date: days_ago(7), count: 4 },
                // the API pads the calendar with future days
                ContributionDay {
                    date: "2026-10-19".to_string(),
                    count: 8,
                },
                ContributionDay {
                    date: "not a date".to_string(),
                    count: 16,
                },
            ],
        };
        let outcome = summarize(&calendar, today());
        let summary = outcome.data().unwrap();
        assert_eq!(summary.this_week, 3);
        assert_eq!(summary.best, 16);
    }

    #[test]
    fn test_timestamped_dates_are_accepted() {
        let calendar = ContributionCalendar {
            total: Some(ContributionTotals { last_year: Some(2) }),
            contributions: vec![ContributionDay {
                date: format!("{}T00:00:00Z", days_ago(1)),
                count: 2,
            }],
        };
        assert_eq!(summarize(&calendar, today()).data().unwrap().this_week, 2);
    }

    #[test]
    fn test_fetch_error_falls_back() {
        let outcome = contribution_outcome(
            Err(StatsError::Network("connection refused".to_string())),
            today(),
        );
        assert_eq!(outcome, StatsOutcome::Fallback(FALLBACK_SUMMARY));
    }

    #[test]
    fn test_malformed_body_falls_back() {
        let outcome = contribution_outcome(Ok("<html>rate limited</html>".to_string()), today());
        assert_eq!(outcome, StatsOutcome::Fallback(FALLBACK_SUMMARY));
    }

    #[test]
    fn test_average_has_one_decimal() {
        for total in [0, 1, 7, 105, 364, 365, 599, 1234, 9999] {
            let calendar = ContributionCalendar {
                total: Some(ContributionTotals {
                    last_year: Some(total),
                }),
                contributions: Vec::new(),
            };
            let average = summarize(&calendar, today()).data().unwrap().average;
            let scaled = average * 10.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-9,
                "{average} has more than one decimal"
            );
        }
    }

    #[test]
    fn test_huge_counts_saturate() {
        let calendar = ContributionCalendar {
            total: Some(ContributionTotals {
                last_year: Some(i64::MAX),
            }),
            contributions: (0..3)
                .map(|n| ContributionDay {
                    date: days_ago(n),
                    count: i64::MAX,
                })
                .collect(),
        };
        let summary = *summarize(&calendar, today()).data().unwrap();
        assert_eq!(summary.this_week, i64::MAX);
        assert_eq!(summary.best, i64::MAX);
        assert_eq!(summary.total, i64::MAX);
    }
}
