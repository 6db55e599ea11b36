use crate::models::{Block, Iso};
use time::Date;

/// The top-level error returned by the pricing and conversion entry points.
///
/// Every variant is a request-level failure: the caller must fix the request
/// or the price feed before trying again.
#[derive(Debug, thiserror::Error)]
pub enum ElektraError {
    /// The request named something the engine does not know how to handle
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The supplied price feed does not cover the requested period exactly
    #[error(transparent)]
    InsufficientData(#[from] InsufficientDataError),

    /// The block has no relevant hours in the requested period (e.g. 5x16 on a holiday)
    #[error("No relevant hours on {flow_date} for ticker {ticker}.")]
    NoRelevantHoursToday {
        /// The requested flow date
        flow_date: Date,
        /// The ticker the price was requested for
        ticker: String,
    },
}

impl ElektraError {
    /// The stable name of the error kind, as reported to boundary callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ElektraConfigError",
            Self::InsufficientData(_) => "InsufficientDataError",
            Self::NoRelevantHoursToday { .. } => "NoRelevantHoursTodayError",
        }
    }

    /// Whether the failure is attributable to the request rather than the engine.
    ///
    /// All current kinds are; the method exists so that boundaries do not
    /// have to enumerate the variants to pick a status.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Configuration(_) | Self::InsufficientData(_) | Self::NoRelevantHoursToday { .. } => {
                true
            }
        }
    }
}

/// Unknown labels, unsupported combinations and malformed tables.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// The ISO label is not one of the supported markets
    #[error("Unknown ISO: {0}")]
    UnknownIso(String),
    /// The block label is not one of the supported conventions
    #[error("Unknown block: {0}")]
    UnknownBlock(String),
    /// The frequency label is not hourly, daily or monthly
    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),
    /// The unit label is neither MW nor MWh
    #[error("Unknown volume unit: {0}")]
    UnknownUnit(String),
    /// The reference time zone name is not in the tz database
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
    /// The market has no peak window on record
    #[error("Invalid ISO: {0}")]
    InvalidIso(Iso),
    /// The block has no required-hour rule
    #[error("Block not found: {0}")]
    UnsupportedBlock(Block),
    /// The (input, output) pair is absent from the conversion table
    #[error("Conversion Not Supported: {input} -> {output}")]
    UnsupportedConversion {
        /// The block the volume is expressed in
        input: Block,
        /// The block the volume was to be converted to
        output: Block,
    },
    /// A block price merge needs exactly two source blocks per row
    #[error("Merging block prices requires exactly two blocks, got {0}")]
    MergeShape(usize),
}

/// The price feed is empty, incomplete, or has duplicate rows.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InsufficientDataError {
    /// No rows were supplied at all
    #[error(
        "input_prices is empty. Expected rows with flow_date (YYYY-MM-DD), hour_ending (number) and price (number)"
    )]
    EmptyInput,

    /// A required (date, hour) cell matched the wrong number of rows
    #[error(
        "Incorrect number of prices for {ticker}/{node}: {iso} {block} {frequency} {date} HE {hour_ending}. Expected: {expected}; Got: {actual}. Stopping."
    )]
    RowCount {
        /// The ticker being priced
        ticker: String,
        /// The pricing node
        node: String,
        /// The market label
        iso: String,
        /// The block label
        block: String,
        /// The frequency label
        frequency: String,
        /// The operating day of the missing cell
        date: Date,
        /// The hour-ending of the missing cell
        hour_ending: u8,
        /// How many rows were expected (2 for the repeated fall-back hour)
        expected: usize,
        /// How many rows were found
        actual: usize,
    },
}
