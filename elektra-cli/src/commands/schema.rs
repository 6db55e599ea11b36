use clap::ValueEnum;
use elektra_core::models::{
    CreatePricesRequest, MergeRequest, ScrubPricesRequest, TranslateRequest,
};
use schemars::{Schema, schema_for};

// The request bodies accepted by the JSON subcommands
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum RequestKind {
    Create,
    Scrub,
    Translate,
    Merge,
}

impl RequestKind {
    pub fn schema(&self) -> Schema {
        match self {
            Self::Create => schema_for!(CreatePricesRequest),
            Self::Scrub => schema_for!(ScrubPricesRequest),
            Self::Translate => schema_for!(TranslateRequest),
            Self::Merge => schema_for!(MergeRequest),
        }
    }
}
