use clap::Parser as _;
use elektra_cli::{AppConfig, BaseArgs, Failure};
use elektra_core::Elektra;
use std::process::ExitCode;
use tracing::{Level, event};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

fn main() -> ExitCode {
    let args = BaseArgs::parse();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) => return report(&error),
    };

    // Events go to stderr; stdout is reserved for the JSON result.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = Elektra::from_config(&config.calendar)
        .map_err(anyhow::Error::from)
        .and_then(|elektra| args.evaluate(&elektra));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(&error),
    }
}

fn report(error: &anyhow::Error) -> ExitCode {
    let failure = Failure::from_error(error);
    event!(Level::ERROR, kind = failure.kind(), "{error:#}");
    match serde_json::to_string_pretty(&failure) {
        Ok(body) => println!("{body}"),
        Err(_) => println!("{}", failure.message()),
    }
    failure.exit_code()
}
