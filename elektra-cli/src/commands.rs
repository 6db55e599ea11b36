use super::{IOArgs, OutputArgs};
use clap::Subcommand;
use time::Date;

mod convert;
mod schema;

pub use convert::{Conversion, FlowArgs, parse_date};
pub use schema::RequestKind;

#[derive(Subcommand)]
pub enum Commands {
    /// Average an hourly price feed into a daily or monthly block price
    Create {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Check one day of an hourly price feed and report every hour it covers
    Scrub {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Reshape a contract volume into other blocks, day by day
    Translate {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Blend monthly prices for two blocks into one hour-weighted price
    Merge {
        #[command(flatten)]
        io: IOArgs,
    },

    /// Report the hours of one block contributed by a unit of another
    Convert {
        #[command(flatten)]
        flow: FlowArgs,
    },

    /// Report whether a date is a daylight-saving transition
    Dst {
        /// The date to check (YYYY-MM-DD)
        #[arg(short, long, value_parser = parse_date)]
        date: Date,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the JSON Schema of a request body
    Schema {
        /// The request to describe
        request: RequestKind,

        #[command(flatten)]
        output: OutputArgs,
    },
}
