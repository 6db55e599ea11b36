use super::{Block, Map, PriceRow};
use time::Date;

/// A request to price one block over a day or month from an hourly feed.
///
/// The labels stay strings here; resolving them is part of the request's
/// semantics and fails with a configuration error rather than a parse error.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatePricesRequest {
    /// The flow date, `YYYY-MM-DD`
    #[cfg_attr(feature = "serde", serde(with = "super::ymd"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub flow_date: Date,
    /// The ticker being priced
    pub ticker: String,
    /// The pricing node
    pub node: String,
    /// The market label, e.g. `pjm`
    pub iso: String,
    /// The block label, e.g. `5x16`
    pub block: String,
    /// `daily` or `monthly`
    pub frequency: String,
    /// The hourly price feed
    pub data: Vec<PriceRow>,
}

/// A request to audit the completeness of one day of an hourly feed.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrubPricesRequest {
    /// The flow date, `YYYY-MM-DD`
    #[cfg_attr(feature = "serde", serde(with = "super::ymd"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub flow_date: Date,
    /// The ticker being audited
    pub ticker: String,
    /// The pricing node
    pub node: String,
    /// The market label
    pub iso: String,
    /// The hourly price feed
    pub data: Vec<PriceRow>,
}

/// The response to a [`CreatePricesRequest`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceResponse {
    /// The block price
    pub price: f64,
}

/// A request to reshape a contract volume into other block conventions.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranslateRequest {
    /// The market label
    pub iso: String,
    /// The contract volume, in MW
    pub volume: f64,
    /// `daily` or `monthly`
    pub frequency: String,
    /// The first flow date of the contract
    #[cfg_attr(feature = "serde", serde(with = "super::ymd"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub contract_start: Date,
    /// The block the contract is written in
    pub input_block: String,
    /// The blocks to report the volume in
    pub output_blocks: Vec<String>,
    /// `MW` or `MWh`
    pub output_unit: String,
}

/// A month of prices for two complementary blocks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPrices {
    /// The first day of the month
    #[cfg_attr(feature = "serde", serde(with = "super::ymd"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub month: Date,
    /// The price of each block for that month
    pub prices: Map<Block>,
}

/// A [`BlockPrices`] row with the hour-weighted blend appended.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergedPrices {
    /// The first day of the month
    #[cfg_attr(feature = "serde", serde(with = "super::ymd"))]
    #[cfg_attr(feature = "schemars", schemars(with = "String"))]
    pub month: Date,
    /// The source block prices, unchanged
    pub prices: Map<Block>,
    /// The hour-weighted average of the source prices
    #[cfg_attr(feature = "serde", serde(rename = "Total"))]
    pub total: f64,
}

/// A request to blend a strip of two-block prices into a single price per month.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeRequest {
    /// The market label (defaults to `pjm`)
    #[cfg_attr(feature = "serde", serde(default = "default_iso"))]
    pub iso: String,
    /// The block the blend represents (defaults to `7x24`)
    #[cfg_attr(feature = "serde", serde(default = "default_block"))]
    pub output_block: String,
    /// The monthly strip
    pub rows: Vec<BlockPrices>,
}

#[cfg(feature = "serde")]
fn default_iso() -> String {
    "pjm".to_owned()
}

#[cfg(feature = "serde")]
fn default_block() -> String {
    "7x24".to_owned()
}
