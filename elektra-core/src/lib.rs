#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Market identifiers, block conventions and the tabular types exchanged with callers.
///
/// The models here carry little behaviour of their own. They exist so that
/// every label arriving from outside (an ISO, a block, a frequency) is turned
/// into a closed enumeration exactly once, at the edge.
pub mod models;

/// Calendar arithmetic: weekends, NERC holidays and daylight-saving transitions.
pub mod calendar;

/// Decides which days and hours count towards a block for a market.
pub mod relevance;

/// The directional block-to-block conversion table.
pub mod conversion;

/// Aggregation of hourly price feeds into block prices.
pub mod prices;

/// Reshaping of contract volumes and block prices across conventions.
pub mod translate;

mod error;
pub use error::{ConfigurationError, ElektraError, InsufficientDataError};

mod engine;
pub use engine::Elektra;
