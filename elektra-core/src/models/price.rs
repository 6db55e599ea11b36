use time::{Date, PrimitiveDateTime};

/// One observation from an hourly price feed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceRow {
    /// The operating day, `YYYY-MM-DD`
    #[cfg_attr(feature = "serde", serde(with = "super::ymd"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub flow_date: Date,
    /// The hour-ending label (1..24; the fall-back hour appears twice)
    pub hour_ending: u8,
    /// The price for that hour
    pub price: f64,
}

impl PriceRow {
    /// Convenience constructor
    pub fn new(flow_date: Date, hour_ending: u8, price: f64) -> Self {
        Self {
            flow_date,
            hour_ending,
            price,
        }
    }
}

/// Marks a required hour that needs more than one price row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Special {
    /// The hour repeated by the fall-back transition
    Long,
}

/// A (date, hour) cell that a block needs a price for.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequiredHour {
    /// The hour-beginning of the cell
    #[cfg_attr(feature = "serde", serde(with = "super::ymd_hm"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub hour_beginning: PrimitiveDateTime,
    /// The hour-ending label; 25 for the second copy of the fall-back hour
    pub hour_ending: u8,
    /// Whether the cell counts towards the block
    pub required: bool,
    /// The price found for the cell, once filled
    pub value: Option<f64>,
    /// Set on both copies of the fall-back hour
    pub special: Option<Special>,
}

impl RequiredHour {
    /// A required, not yet priced cell
    pub fn new(hour_beginning: PrimitiveDateTime, hour_ending: u8, special: Option<Special>) -> Self {
        Self {
            hour_beginning,
            hour_ending,
            required: true,
            value: None,
            special,
        }
    }

    /// The operating day the cell belongs to
    pub fn date(&self) -> Date {
        self.hour_beginning.date()
    }

    /// How many feed rows must match this cell
    pub fn expected_rows(&self) -> usize {
        match self.special {
            Some(Special::Long) => 2,
            None => 1,
        }
    }
}
