//! Calendar arithmetic for power-market operating days.
//!
//! A [`Calendar`] owns the two pieces of state the relevance rules consult:
//! the NERC holiday sets (computed on first use per year and kept for the
//! calendar's lifetime) and the reference time zone used to find daylight
//! saving transitions. Create one and pass it by reference; it is `Sync`, so
//! it can be shared across threads as well.

mod dst;
mod holidays;

pub use dst::DstTransition;
pub use holidays::nerc_holidays;

use crate::ConfigurationError;
use crate::models::Map;
use chrono_tz::Tz;
use std::sync::{Arc, Mutex, PoisonError};
use time::{Date, Duration, Month, PrimitiveDateTime, Time, Weekday};

/// The holidays of one year, in date order
pub type HolidaySet = indexmap::IndexSet<Date, rustc_hash::FxBuildHasher>;

/// Settings for the calendar.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CalendarConfig {
    /// The IANA zone whose daylight saving transitions apply to every market.
    ///
    /// Markets outside this zone still follow its transition dates.
    pub dst_reference: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            dst_reference: "America/Chicago".to_owned(),
        }
    }
}

/// Holiday cache and DST reference for the relevance rules.
#[derive(Debug)]
pub struct Calendar {
    reference: Tz,
    holidays: Mutex<Map<i32, Arc<HolidaySet>>>,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(chrono_tz::America::Chicago)
    }
}

impl Calendar {
    /// A calendar using `reference` for DST transitions
    pub fn new(reference: Tz) -> Self {
        Self {
            reference,
            holidays: Mutex::new(Map::default()),
        }
    }

    /// Builds a calendar from its configuration, validating the zone name
    pub fn from_config(config: &CalendarConfig) -> Result<Self, ConfigurationError> {
        let reference = config
            .dst_reference
            .parse::<Tz>()
            .map_err(|_| ConfigurationError::UnknownTimeZone(config.dst_reference.clone()))?;
        Ok(Self::new(reference))
    }

    /// The zone whose DST transitions are applied
    pub fn reference(&self) -> Tz {
        self.reference
    }

    /// The NERC holidays observed in `year`.
    ///
    /// Computed once per year and cached. Two threads missing on the same
    /// year at once both compute it; the results are identical.
    pub fn holidays(&self, year: i32) -> Arc<HolidaySet> {
        if let Some(cached) = self.cache().get(&year) {
            return Arc::clone(cached);
        }

        let computed = Arc::new(nerc_holidays(year).collect::<HolidaySet>());
        self.cache().insert(year, Arc::clone(&computed));
        computed
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Map<i32, Arc<HolidaySet>>> {
        // the cache only ever grows by whole entries, so a poisoned lock is still consistent
        self.holidays.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether `date` is a NERC holiday
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays(date.year()).contains(&date)
    }

    /// Whether `date` is a weekend or a NERC holiday
    pub fn is_offpeak_day(&self, date: Date) -> bool {
        is_weekend_day(date) || self.is_holiday(date)
    }

    /// Whether `date` is neither a weekend nor a NERC holiday
    pub fn is_peak_day(&self, date: Date) -> bool {
        !self.is_offpeak_day(date)
    }
}

/// Whether `date` falls on a Saturday or Sunday
pub fn is_weekend_day(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// The number of days in a month
pub fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        Month::February if time::util::is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// The first day of the month containing `date`
pub fn first_day_of_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}

/// The last day of the month containing `date`
pub fn last_day_of_month(date: Date) -> Date {
    let remaining = days_in_month(date.year(), date.month()) - date.day();
    date + Duration::days(i64::from(remaining))
}

/// Hour-beginning 0 of `date`
pub fn first_hour_of_day(date: Date) -> PrimitiveDateTime {
    PrimitiveDateTime::new(date, Time::MIDNIGHT)
}

/// Hour-beginning 23 of `date`
pub fn last_hour_of_day(date: Date) -> PrimitiveDateTime {
    first_hour_of_day(date) + Duration::hours(23)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::{date, datetime};

    #[rstest]
    #[case(date!(2020 - 10 - 16), false)]
    #[case(date!(2020 - 10 - 17), true)]
    #[case(date!(2020 - 10 - 18), true)]
    #[case(date!(2020 - 10 - 19), false)]
    fn test_weekend(#[case] day: Date, #[case] expected: bool) {
        assert_eq!(is_weekend_day(day), expected);
    }

    #[rstest]
    #[case(date!(2023 - 12 - 25), true)] // Christmas on a Monday
    #[case(date!(2022 - 11 - 24), true)] // Thanksgiving
    #[case(date!(2022 - 01 - 01), true)] // New Year's on a Saturday, not moved
    #[case(date!(2023 - 01 - 02), true)] // New Year's observed on Monday
    #[case(date!(2020 - 10 - 17), true)] // plain Saturday
    #[case(date!(2020 - 10 - 16), false)]
    #[case(date!(2021 - 12 - 24), false)] // Friday before a Saturday Christmas is a normal day
    fn test_offpeak(#[case] day: Date, #[case] expected: bool) {
        let calendar = Calendar::default();
        assert_eq!(calendar.is_offpeak_day(day), expected);
        assert_eq!(calendar.is_peak_day(day), !expected);
    }

    #[test]
    fn test_peak_offpeak_partition_over_a_year() {
        let calendar = Calendar::default();
        let mut day = date!(2024 - 01 - 01);
        while day.year() == 2024 {
            assert_ne!(calendar.is_peak_day(day), calendar.is_offpeak_day(day));
            day = day.next_day().unwrap();
        }
    }

    #[test]
    fn test_holidays_are_cached() {
        let calendar = Calendar::default();
        let first = calendar.holidays(2023);
        let second = calendar.holidays(2023);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(first_day_of_month(date!(2024 - 02 - 17)), date!(2024 - 02 - 01));
        assert_eq!(last_day_of_month(date!(2024 - 02 - 17)), date!(2024 - 02 - 29));
        assert_eq!(last_day_of_month(date!(2023 - 02 - 01)), date!(2023 - 02 - 28));
        assert_eq!(last_day_of_month(date!(2020 - 12 - 31)), date!(2020 - 12 - 31));
        assert_eq!(first_hour_of_day(date!(2020 - 10 - 17)), datetime!(2020-10-17 0:00));
        assert_eq!(last_hour_of_day(date!(2020 - 10 - 17)), datetime!(2020-10-17 23:00));
    }

    #[test]
    fn test_config() {
        let calendar = Calendar::from_config(&CalendarConfig::default()).unwrap();
        assert_eq!(calendar.reference(), chrono_tz::America::Chicago);

        let bad = CalendarConfig {
            dst_reference: "America/Nowhere".to_owned(),
        };
        assert_eq!(
            Calendar::from_config(&bad).unwrap_err(),
            ConfigurationError::UnknownTimeZone("America/Nowhere".to_owned())
        );
    }
}
