#![doc = include_str!("../README.md")]
use clap::Parser;
use elektra_core::models::{
    CreatePricesRequest, MergeRequest, PriceResponse, ScrubPricesRequest, TranslateRequest,
};
use elektra_core::{Elektra, ElektraError};
use serde::Serialize;
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::{AppConfig, LogConfig};

// The top-level arguments: where to find configuration, and which subcommand to execute
#[derive(Parser)]
#[command(name = "elektra", version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "ELEKTRA_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub fn evaluate(self, elektra: &Elektra) -> anyhow::Result<()> {
        match self.command {
            Commands::Create { io } => {
                let request = serde_json::from_reader::<_, CreatePricesRequest>(io.read()?)?;
                let price = elektra.create_prices(&request)?;
                serde_json::to_writer_pretty(io.write()?, &PriceResponse { price })?;
            }
            Commands::Scrub { io } => {
                let request = serde_json::from_reader::<_, ScrubPricesRequest>(io.read()?)?;
                let hours = elektra.scrub_hourly_prices(&request)?;
                serde_json::to_writer_pretty(io.write()?, &hours)?;
            }
            Commands::Translate { io } => {
                let request = serde_json::from_reader::<_, TranslateRequest>(io.read()?)?;
                let table = elektra.translate_blocks(&request)?;
                serde_json::to_writer_pretty(io.write()?, &table)?;
            }
            Commands::Merge { io } => {
                let request = serde_json::from_reader::<_, MergeRequest>(io.read()?)?;
                let merged = elektra.merge_block_prices(&request)?;
                serde_json::to_writer_pretty(io.write()?, &merged)?;
            }
            Commands::Convert { flow } => {
                let conversion = flow.evaluate(elektra)?;
                serde_json::to_writer_pretty(stdout().lock(), &conversion)?;
            }
            Commands::Dst { date, output } => {
                let transition = elektra.is_dst_transition(date);
                serde_json::to_writer_pretty(output.write()?, &transition)?;
            }
            Commands::Schema { request, output } => {
                serde_json::to_writer_pretty(output.write()?, &request.schema())?;
            }
        }

        Ok(())
    }
}

/// The JSON body reported when a command fails.
#[derive(Debug, Serialize, PartialEq)]
pub struct Failure {
    success: bool,
    error: FailureDetail,
    #[serde(skip)]
    client: bool,
}

#[derive(Debug, Serialize, PartialEq)]
struct FailureDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl Failure {
    /// Classifies an error the way a service boundary would: rejected
    /// requests report their kind and message, anything else is opaque.
    pub fn from_error(error: &anyhow::Error) -> Self {
        if let Some(err) = error.downcast_ref::<ElektraError>() {
            Self::new(err.kind(), err.to_string(), err.is_client_error())
        } else if let Some(err) = error.downcast_ref::<CliError>() {
            Self::new("NotFound", err.to_string(), true)
        } else if let Some(err) = error.downcast_ref::<serde_json::Error>()
            && (err.is_data() || err.is_syntax() || err.is_eof())
        {
            Self::new("ValidationError", err.to_string(), true)
        } else {
            Self::new("Unexpected", "An unexpected error has occurred.".to_owned(), false)
        }
    }

    fn new(kind: &str, message: String, client: bool) -> Self {
        Self {
            success: false,
            error: FailureDetail {
                kind: kind.to_owned(),
                message,
            },
            client,
        }
    }

    /// The error type name
    pub fn kind(&self) -> &str {
        &self.error.kind
    }

    /// The human-readable message
    pub fn message(&self) -> &str {
        &self.error.message
    }

    /// 2 for a rejected request, 1 for anything else
    pub fn exit_code(&self) -> ExitCode {
        if self.client {
            ExitCode::from(2)
        } else {
            ExitCode::FAILURE
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Config file {} does not exist", .0.display())]
    MissingConfig(PathBuf),
    #[error("Request file {} does not exist", .0.display())]
    MissingInput(PathBuf),
}
