use crate::calendar::{first_day_of_month, first_hour_of_day, last_day_of_month, last_hour_of_day};
use time::{Date, PrimitiveDateTime};

/// The granularity of a pricing or volume request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String")
)]
pub enum Frequency {
    /// A single hour
    #[cfg_attr(feature = "serde", serde(rename = "hourly"))]
    Hourly,
    /// A single operating day
    #[cfg_attr(feature = "serde", serde(rename = "daily"))]
    Daily,
    /// A calendar month
    #[cfg_attr(feature = "serde", serde(rename = "monthly"))]
    Monthly,
}

label_enum!(Frequency, UnknownFrequency, {
    Hourly => "hourly",
    Daily => "daily",
    Monthly => "monthly",
});

impl Frequency {
    /// The inclusive hour-beginning range a price request covers.
    ///
    /// Monthly requests span hour 0 of the first of the month through hour
    /// 23 of its last day; anything else covers the flow date alone.
    pub fn hour_range(self, flow_date: Date) -> (PrimitiveDateTime, PrimitiveDateTime) {
        match self {
            Self::Monthly => (
                first_hour_of_day(first_day_of_month(flow_date)),
                last_hour_of_day(last_day_of_month(flow_date)),
            ),
            Self::Hourly | Self::Daily => {
                (first_hour_of_day(flow_date), last_hour_of_day(flow_date))
            }
        }
    }

    /// The calendar days a contract starting on `start` covers.
    ///
    /// Unlike [`Frequency::hour_range`], a monthly contract runs from the
    /// start date itself to the end of that month.
    pub fn day_range(self, start: Date) -> impl Iterator<Item = Date> {
        let end = match self {
            Self::Monthly => last_day_of_month(start),
            Self::Hourly | Self::Daily => start,
        };
        std::iter::successors(Some(start), |day| day.next_day()).take_while(move |day| *day <= end)
    }
}
