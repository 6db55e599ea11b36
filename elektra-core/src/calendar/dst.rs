use super::Calendar;
use chrono::{NaiveDate, TimeZone as _};
use chrono_tz::{OffsetComponents as _, Tz};
use time::{Date, Month};

/// How daylight saving affects an operating day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DstTransition {
    /// The reference zone's UTC offset changes during the day
    pub is_transition: bool,
    /// The spring-forward day, which skips an hour
    pub short_day: bool,
    /// The fall-back day, which repeats an hour
    pub long_day: bool,
}

impl Calendar {
    /// Classifies `date` against the reference zone's transitions.
    ///
    /// Only March transitions count as short and only November transitions
    /// as long; a transition in any other month is reported but neither.
    pub fn is_dst_transition(&self, date: Date) -> DstTransition {
        let is_transition = match (offsets(self.reference, date), date.next_day()) {
            (Some(today), Some(tomorrow)) => match offsets(self.reference, tomorrow) {
                Some(next) => today.utc != next.utc,
                None => false,
            },
            _ => false,
        };

        DstTransition {
            is_transition,
            short_day: is_transition && date.month() == Month::March,
            long_day: is_transition && date.month() == Month::November,
        }
    }

    /// The change in DST offset, in hours, from `date` to the following day.
    ///
    /// -1 on the spring-forward day, +1 on the fall-back day, 0 otherwise
    /// (including when the offsets cannot be determined).
    pub fn dst_hour(&self, date: Date) -> f64 {
        let today = offsets(self.reference, date);
        let tomorrow = date.next_day().and_then(|next| offsets(self.reference, next));
        match (today, tomorrow) {
            (Some(today), Some(tomorrow)) => {
                (today.dst - tomorrow.dst).num_seconds() as f64 / 3600.0
            }
            _ => 0.0,
        }
    }

    /// Corrects a whole-day hour count for a DST transition on `date`:
    /// one fewer on the short day, one more on the long day.
    pub fn adjust_dst(&self, date: Date, hours: f64) -> f64 {
        let DstTransition {
            short_day,
            long_day,
            ..
        } = self.is_dst_transition(date);

        if short_day {
            hours - 1.0
        } else if long_day {
            hours + 1.0
        } else {
            hours
        }
    }
}

struct Offsets {
    utc: chrono::Duration,
    dst: chrono::Duration,
}

/// The reference zone's offsets at local midnight of `date`
fn offsets(zone: Tz, date: Date) -> Option<Offsets> {
    let midnight = NaiveDate::from_ymd_opt(date.year(), u8::from(date.month()).into(), date.day().into())?
        .and_hms_opt(0, 0, 0)?;
    let local = zone.from_local_datetime(&midnight).earliest()?;
    let offset = local.offset();
    Some(Offsets {
        utc: offset.base_utc_offset() + offset.dst_offset(),
        dst: offset.dst_offset(),
    })
}
