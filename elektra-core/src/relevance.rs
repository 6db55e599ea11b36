//! Which days and hours belong to a block.
//!
//! Hours are numbered hour-ending (HE1 is 00:00-01:00). On the spring-forward
//! day HE3 does not exist; on the fall-back day HE2 happens twice, which is
//! reported as [`Special::Long`] so that callers can expect a second row for it.

use crate::calendar::Calendar;
use crate::models::{Block, Iso, PeakWindow, Special};
use crate::ConfigurationError;
use time::Date;
use tracing::{Level, event};

/// The hour-ending skipped on the spring-forward day
const SHORT_HOUR: u8 = 3;
/// The hour-ending repeated on the fall-back day
const LONG_HOUR: u8 = 2;

/// The outcome of [`is_relevant_hour`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HourRelevance {
    /// Whether the hour counts towards the block
    pub relevant: bool,
    /// Set when the hour needs a duplicate row
    pub special: Option<Special>,
}

impl HourRelevance {
    const NONE: Self = Self {
        relevant: false,
        special: None,
    };
}

/// Whether `date` is a day on which the block has any hours.
///
/// The market does not affect the answer; it is accepted so that every
/// relevance question is asked the same way.
pub fn is_relevant_day(calendar: &Calendar, block: Block, _iso: Iso, date: Date) -> bool {
    match block {
        Block::OnPeak => calendar.is_peak_day(date),
        Block::OffPeak | Block::DailyPeak | Block::Atc | Block::Wrap => true,
        Block::WeekendPeak => calendar.is_offpeak_day(date),
        Block::Hourly => false,
    }
}

/// Whether hour-ending `hour_ending` of `date` belongs to the block in `iso`.
///
/// Fails when the market has no peak window.
pub fn is_relevant_hour(
    calendar: &Calendar,
    block: Block,
    iso: Iso,
    hour_ending: u8,
    date: Date,
) -> Result<HourRelevance, ConfigurationError> {
    let window = iso.peak_window()?;
    Ok(hour_relevance(calendar, block, window, hour_ending, date))
}

/// [`is_relevant_hour`] with the market's window already resolved.
pub(crate) fn hour_relevance(
    calendar: &Calendar,
    block: Block,
    window: PeakWindow,
    hour_ending: u8,
    date: Date,
) -> HourRelevance {
    let relevant = match block {
        Block::OnPeak | Block::DailyPeak | Block::WeekendPeak => window.contains(hour_ending),
        Block::Atc | Block::Hourly => true,
        Block::Wrap => calendar.is_offpeak_day(date) || !window.contains(hour_ending),
        Block::OffPeak => !window.contains(hour_ending),
    };

    if !relevant {
        return HourRelevance::NONE;
    }

    let transition = calendar.is_dst_transition(date);
    if transition.short_day && hour_ending == SHORT_HOUR {
        event!(Level::INFO, short_day = %date, short_hour = hour_ending);
        HourRelevance::NONE
    } else if transition.long_day && hour_ending == LONG_HOUR {
        event!(Level::INFO, long_day = %date, long_hour = hour_ending);
        HourRelevance {
            relevant: true,
            special: Some(Special::Long),
        }
    } else {
        HourRelevance {
            relevant: true,
            special: None,
        }
    }
}

/// The number of hours a full day of the block is expected to contain.
///
/// Only the 7x24, Wrap, 5x16, 7x16 and 7x8 blocks have a rule.
pub fn get_required_hours(
    calendar: &Calendar,
    block: Block,
    date: Date,
) -> Result<f64, ConfigurationError> {
    match block {
        Block::Atc => Ok(24.0 + calendar.dst_hour(date)),
        Block::Wrap if calendar.is_peak_day(date) => Ok(16.0),
        Block::Wrap => Ok(8.0 + calendar.dst_hour(date)),
        Block::OnPeak | Block::DailyPeak => Ok(16.0),
        Block::OffPeak => Ok(8.0 + calendar.dst_hour(date)),
        Block::WeekendPeak | Block::Hourly => Err(ConfigurationError::UnsupportedBlock(block)),
    }
}
