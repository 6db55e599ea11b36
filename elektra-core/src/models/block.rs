/// A named convention grouping the hours of a day into a pricing bucket.
///
/// Labels follow the "days x hours" trading shorthand, e.g. `5x16` is the
/// sixteen peak hours of the five weekdays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String")
)]
pub enum Block {
    /// `7x8`: the off-peak hours outside the peak window, every day
    #[cfg_attr(feature = "serde", serde(rename = "7x8"))]
    OffPeak,
    /// `5x16`: the peak window on peak days
    #[cfg_attr(feature = "serde", serde(rename = "5x16"))]
    OnPeak,
    /// `2x16`: the peak window on weekends and holidays
    #[cfg_attr(feature = "serde", serde(rename = "2x16"))]
    WeekendPeak,
    /// `7x24`: every hour of every day
    #[cfg_attr(feature = "serde", serde(rename = "7x24"))]
    Atc,
    /// `7x16`: the peak window, every day
    #[cfg_attr(feature = "serde", serde(rename = "7x16"))]
    DailyPeak,
    /// `1x1`: a single hour
    #[cfg_attr(feature = "serde", serde(rename = "1x1"))]
    Hourly,
    /// `Wrap`: off-peak weekday hours plus all weekend and holiday hours
    Wrap,
}

label_enum!(Block, UnknownBlock, {
    OffPeak => "7x8",
    OnPeak => "5x16",
    WeekendPeak => "2x16",
    Atc => "7x24",
    DailyPeak => "7x16",
    Hourly => "1x1",
    Wrap => "Wrap",
});
