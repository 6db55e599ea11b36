//! Block prices from an hourly feed.
//!
//! Both entry points share the same machinery: expand the requested period
//! into a schedule of required (date, hour-ending) cells, match each cell
//! against the feed, and fail on the first cell that does not have exactly
//! the expected number of rows. The fall-back hour expects two rows; the
//! second becomes a synthetic HE25 cell appended after the rest.

use crate::calendar::Calendar;
use crate::models::{Block, Frequency, Iso, Map, PeakWindow, PriceRow, RequiredHour, Special};
use crate::relevance::{hour_relevance, is_relevant_day};
use crate::{ElektraError, InsufficientDataError};
use time::{Date, Duration, PrimitiveDateTime};
use tracing::{Level, event};

/// The hour-ending given to the second copy of the fall-back hour
const LONG_HOUR_DUPLICATE: u8 = 25;

/// The identity of a block price request.
#[derive(Clone, Copy, Debug)]
pub struct PriceQuery<'a> {
    /// The flow date; any day of the month for monthly requests
    pub flow_date: Date,
    /// The ticker being priced
    pub ticker: &'a str,
    /// The pricing node
    pub node: &'a str,
    /// The market
    pub iso: Iso,
    /// The block
    pub block: Block,
    /// The period the price covers
    pub frequency: Frequency,
}

/// Averages the relevant hours of `prices` into one block price.
///
/// Every required hour counts once, including both copies of the fall-back
/// hour; the mean is not weighted.
pub fn create_prices(
    calendar: &Calendar,
    query: &PriceQuery<'_>,
    prices: &[PriceRow],
) -> Result<f64, ElektraError> {
    let hours = fill(calendar, query, prices, true)?;

    if hours.is_empty() {
        return Err(ElektraError::NoRelevantHoursToday {
            flow_date: query.flow_date,
            ticker: query.ticker.to_owned(),
        });
    }

    let total: f64 = hours.iter().filter_map(|hour| hour.value).sum();
    let price = total / hours.len() as f64;

    event!(
        Level::INFO,
        flow_date = %query.flow_date,
        ticker = query.ticker,
        block = %query.block,
        frequency = %query.frequency,
        iso = %query.iso,
        hours = hours.len(),
        price,
        "block price"
    );
    Ok(price)
}

/// Matches one day of an hourly feed against every hour of that day.
///
/// Returns the filled schedule so that callers can audit the feed.
pub fn scrub_hourly_prices(
    calendar: &Calendar,
    flow_date: Date,
    ticker: &str,
    node: &str,
    iso: Iso,
    prices: &[PriceRow],
) -> Result<Vec<RequiredHour>, ElektraError> {
    let query = PriceQuery {
        flow_date,
        ticker,
        node,
        iso,
        block: Block::Hourly,
        frequency: Frequency::Hourly,
    };
    let hours = fill(calendar, &query, prices, false)?;

    event!(
        Level::INFO,
        flow_date = %flow_date,
        ticker,
        iso = %iso,
        hours = hours.len(),
        "scrubbed hourly prices"
    );
    Ok(hours)
}

/// Builds the schedule for `query` and fills it from `prices`.
///
/// Hourly scrubs skip the day check, since no day is relevant to a `1x1` block.
fn fill(
    calendar: &Calendar,
    query: &PriceQuery<'_>,
    prices: &[PriceRow],
    check_day: bool,
) -> Result<Vec<RequiredHour>, ElektraError> {
    if prices.is_empty() {
        return Err(InsufficientDataError::EmptyInput.into());
    }

    let window = query.iso.peak_window()?;
    let index = PriceIndex::new(prices);

    let mut filled = Vec::new();
    let mut duplicates = Vec::new();

    for mut hour in schedule(calendar, query, window, check_day) {
        let found = index.get(hour.date(), hour.hour_ending);
        match (hour.special, found) {
            (None, [value]) => {
                hour.value = Some(*value);
                filled.push(hour);
            }
            (Some(Special::Long), [first, second]) => {
                duplicates.push(RequiredHour {
                    hour_ending: LONG_HOUR_DUPLICATE,
                    value: Some(*second),
                    ..hour.clone()
                });
                hour.value = Some(*first);
                filled.push(hour);
            }
            _ => {
                return Err(InsufficientDataError::RowCount {
                    ticker: query.ticker.to_owned(),
                    node: query.node.to_owned(),
                    iso: query.iso.to_string(),
                    block: query.block.to_string(),
                    frequency: query.frequency.to_string(),
                    date: hour.date(),
                    hour_ending: hour.hour_ending,
                    expected: hour.expected_rows(),
                    actual: found.len(),
                }
                .into());
            }
        }
    }

    filled.append(&mut duplicates);
    Ok(filled)
}

/// The required cells of the query's period, in hour order.
///
/// Each call walks the period afresh; nothing is materialized until the
/// caller collects.
fn schedule<'a>(
    calendar: &'a Calendar,
    query: &PriceQuery<'_>,
    window: PeakWindow,
    check_day: bool,
) -> impl Iterator<Item = RequiredHour> + 'a {
    let (start, end) = query.frequency.hour_range(query.flow_date);
    let block = query.block;
    let iso = query.iso;

    hours_between(start, end).filter_map(move |hour_beginning| {
        let date = hour_beginning.date();
        let hour_ending = hour_beginning.hour() + 1;

        if check_day && !is_relevant_day(calendar, block, iso, date) {
            return None;
        }
        let relevance = hour_relevance(calendar, block, window, hour_ending, date);
        if !relevance.relevant {
            return None;
        }

        event!(Level::DEBUG, %date, hour_ending, "relevant hour");
        Some(RequiredHour::new(hour_beginning, hour_ending, relevance.special))
    })
}

/// Every hour-beginning from `start` through `end`, inclusive
fn hours_between(
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> impl Iterator<Item = PrimitiveDateTime> {
    std::iter::successors(Some(start), |hour| hour.checked_add(Duration::HOUR))
        .take_while(move |hour| *hour <= end)
}

/// Feed prices grouped by (date, hour-ending), in feed order.
struct PriceIndex(Map<(Date, u8), Vec<f64>>);

impl PriceIndex {
    fn new(prices: &[PriceRow]) -> Self {
        let mut index = Map::<(Date, u8), Vec<f64>>::default();
        for row in prices {
            index
                .entry((row.flow_date, row.hour_ending))
                .or_default()
                .push(row.price);
        }
        Self(index)
    }

    fn get(&self, date: Date, hour_ending: u8) -> &[f64] {
        self.0
            .get(&(date, hour_ending))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
