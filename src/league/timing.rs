use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;

use crate::models::week::{SeasonWeek, WeekDescriptor, LAST_UNIFIED_WEEK};

pub const DEFAULT_PRESEASON_START: &str = "2025-08-07";

/// Computes the pool's logical week from a date and the preseason start.
///
/// Weeks roll over every seven days counted from the preseason start date
/// on the league's (US/Eastern) calendar. The calculator is pure and never
/// fails: unusable input yields week 1 with a `fallback_reason`.
pub struct WeekCalculator;

impl Default for WeekCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WeekCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Week for `now` given the stored preseason start string
    pub fn calculate(&self, now: DateTime<Utc>, preseason_start: &str) -> WeekDescriptor {
        match parse_preseason_start(preseason_start) {
            Some(start) => self.calculate_from_date(now, start),
            None => {
                tracing::warn!(
                    "Invalid preseason start date '{}', falling back to preseason week 1",
                    preseason_start
                );
                WeekDescriptor::fallback(format!("invalid preseason start date '{}'", preseason_start))
            }
        }
    }

    pub fn calculate_from_date(&self, now: DateTime<Utc>, preseason_start: NaiveDate) -> WeekDescriptor {
        let today = now.with_timezone(&New_York).date_naive();
        let days_elapsed = (today - preseason_start).num_days();

        // Before the preseason starts we are in week 1
        if days_elapsed < 0 {
            return WeekDescriptor::from_season_week(SeasonWeek::first());
        }

        let unified = (days_elapsed / 7 + 1).min(LAST_UNIFIED_WEEK as i64) as u8;
        let season_week = SeasonWeek::from_unified(unified).unwrap_or_else(SeasonWeek::last);

        tracing::debug!(
            "Calculated {} ({}) for {} with preseason start {}",
            season_week.label(),
            season_week.tag(),
            today,
            preseason_start
        );

        WeekDescriptor::from_season_week(season_week)
    }

    /// Calculator preview for an arbitrary date string (admin tooling)
    pub fn preview(&self, date: &str, preseason_start: &str) -> WeekDescriptor {
        match parse_instant(date) {
            Some(now) => self.calculate(now, preseason_start),
            None => {
                tracing::warn!("Invalid preview date '{}', falling back to preseason week 1", date);
                WeekDescriptor::fallback(format!("invalid date '{}'", date))
            }
        }
    }

    /// First calendar day of a week
    pub fn week_start_date(&self, preseason_start: NaiveDate, week: SeasonWeek) -> NaiveDate {
        preseason_start + Duration::weeks(week.unified() as i64 - 1)
    }

    /// Conventional Sunday 1:00pm Eastern kickoff inside a week
    pub fn default_kickoff(&self, preseason_start: NaiveDate, week: SeasonWeek) -> DateTime<Utc> {
        let start = self.week_start_date(preseason_start, week);
        let days_to_sunday = (7 - start.weekday().num_days_from_sunday()) % 7;
        let sunday = start + Duration::days(days_to_sunday as i64);
        let one_pm = NaiveTime::from_hms_opt(13, 0, 0).unwrap_or(NaiveTime::MIN);
        New_York
            .from_local_datetime(&sunday.and_time(one_pm))
            .earliest()
            .map(|kickoff| kickoff.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&sunday.and_time(one_pm)))
    }
}

pub fn parse_preseason_start(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// RFC 3339 timestamp, or a plain date taken as noon Eastern
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0)?);
    New_York
        .from_local_datetime(&noon)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Weekday};

    #[test]
    fn test_week_start_date_advances_weekly() {
        let calculator = WeekCalculator::new();
        let start = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let regular_1 = SeasonWeek::from_unified(4).unwrap();
        assert_eq!(
            calculator.week_start_date(start, regular_1),
            NaiveDate::from_ymd_opt(2025, 8, 28).unwrap()
        );
    }

    #[test]
    fn test_default_kickoff_is_sunday_afternoon_eastern() {
        let calculator = WeekCalculator::new();
        let start = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let kickoff = calculator.default_kickoff(start, SeasonWeek::first());
        let eastern = kickoff.with_timezone(&New_York);
        assert_eq!(eastern.weekday(), Weekday::Sun);
        assert_eq!(eastern.date_naive(), NaiveDate::from_ymd_opt(2025, 8, 10).unwrap());
        assert_eq!(eastern.hour(), 13);
    }

    #[test]
    fn test_parse_instant_accepts_plain_dates() {
        assert!(parse_instant("2025-09-10").is_some());
        assert!(parse_instant("2025-09-10T18:00:00Z").is_some());
        assert!(parse_instant("next tuesday").is_none());
    }
}
