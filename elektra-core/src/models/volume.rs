use super::{Block, Map};
use time::Date;

/// The unit a translated volume is reported in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String")
)]
pub enum VolumeUnit {
    /// Capacity: a day with any hours in the block carries the flat volume
    #[cfg_attr(feature = "serde", serde(rename = "MW"))]
    Mw,
    /// Energy: the volume is multiplied by the block's hours that day
    #[cfg_attr(feature = "serde", serde(rename = "MWh"))]
    Mwh,
}

label_enum!(VolumeUnit, UnknownUnit, {
    Mw => "MW",
    Mwh => "MWh",
});

/// One day of a translated contract.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockRow {
    /// The flow date
    #[cfg_attr(feature = "serde", serde(with = "super::ymd"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub date: Date,
    /// The converted volume for each requested output block
    pub volumes: Map<Block>,
}

/// A per-day table of volumes, one column per output block.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct BlockTable(pub Vec<BlockRow>);

impl BlockTable {
    /// The rows of the table, in date order
    pub fn rows(&self) -> &[BlockRow] {
        &self.0
    }

    /// The sum of one column over every day (zero for an absent column)
    pub fn total(&self, block: Block) -> f64 {
        self.0
            .iter()
            .filter_map(|row| row.volumes.get(&block))
            .sum()
    }

    /// The value of one cell, if present
    pub fn get(&self, date: Date, block: Block) -> Option<f64> {
        self.0
            .iter()
            .find(|row| row.date == date)
            .and_then(|row| row.volumes.get(&block).copied())
    }
}
