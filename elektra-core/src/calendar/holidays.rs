use super::days_in_month;
use time::{Date, Duration, Month, Weekday};

/// The NERC additional off-peak days for `year`.
///
/// New Year's Day, Independence Day and Christmas move to Monday when they
/// fall on a Sunday; a Saturday date is not moved. Memorial Day, Labor Day and
/// Thanksgiving are fixed weekdays.
///
/// See <https://www.nerc.com/comm/OC/RS%20Agendas%20Highlights%20and%20Minutes%20DL/Additional_Off-peak_Days.pdf>
pub fn nerc_holidays(year: i32) -> impl Iterator<Item = Date> {
    [
        observed(year, Month::January, 1),
        last_weekday(year, Month::May, Weekday::Monday),
        observed(year, Month::July, 4),
        nth_weekday(year, Month::September, Weekday::Monday, 1),
        nth_weekday(year, Month::November, Weekday::Thursday, 4),
        observed(year, Month::December, 25),
    ]
    .into_iter()
    .flatten()
}

/// A fixed-date holiday, moved to Monday when it falls on a Sunday
fn observed(year: i32, month: Month, day: u8) -> Option<Date> {
    let date = Date::from_calendar_date(year, month, day).ok()?;
    match date.weekday() {
        Weekday::Sunday => date.next_day(),
        _ => Some(date),
    }
}

/// The `n`th (1-based) `weekday` of the month
fn nth_weekday(year: i32, month: Month, weekday: Weekday, n: u8) -> Option<Date> {
    let first = Date::from_calendar_date(year, month, 1).ok()?;
    let offset = (7 + weekday.number_days_from_monday() - first.weekday().number_days_from_monday()) % 7;
    Date::from_calendar_date(year, month, 1 + offset + 7 * (n - 1)).ok()
}

/// The last `weekday` of the month
fn last_weekday(year: i32, month: Month, weekday: Weekday) -> Option<Date> {
    let last = Date::from_calendar_date(year, month, days_in_month(year, month)).ok()?;
    let offset = (7 + last.weekday().number_days_from_monday() - weekday.number_days_from_monday()) % 7;
    last.checked_sub(Duration::days(i64::from(offset)))
}
