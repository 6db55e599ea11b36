use clap::Args;
use elektra_core::Elektra;
use serde::Serialize;
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// Parses a `YYYY-MM-DD` argument
pub fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
}

// The block labels stay strings so that an unknown label is reported like
// any other rejected request, rather than as a usage error.
#[derive(Args)]
pub struct FlowArgs {
    /// The flow date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    date: Date,

    /// The hour-beginning of the flow (0-23); only hourly inputs depend on it
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=23))]
    hour: u8,

    /// The block the volume is written in
    #[arg(short, long)]
    input: String,

    /// The block to express it in
    #[arg(long)]
    output: String,
}

/// One looked-up conversion factor.
#[derive(Debug, Serialize, PartialEq)]
pub struct Conversion {
    #[serde(with = "flow_format")]
    pub flow: PrimitiveDateTime,
    pub input: String,
    pub output: String,
    pub factor: f64,
}

time::serde::format_description!(flow_format, PrimitiveDateTime, "[year]-[month]-[day] [hour]:[minute]");

impl FlowArgs {
    pub fn evaluate(self, elektra: &Elektra) -> anyhow::Result<Conversion> {
        let flow = PrimitiveDateTime::new(self.date, Time::from_hms(self.hour, 0, 0)?);
        let factor = elektra.convert(flow, &self.input, &self.output)?;
        Ok(Conversion {
            flow,
            input: self.input,
            output: self.output,
            factor,
        })
    }
}
