mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vellum_core::{CallContext, Provider};

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.log_json);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout carries the result document; logs go to stderr.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(result) = commands::dispatch_offline(&cli.command, &cli.global) {
        return result;
    }

    let provider = Provider::new(&build_client_config(&cli.global)?)?;

    let ctx = CallContext::new();
    let cancel = ctx.cancellation().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    commands::dispatch(cli.command, &provider, &ctx, &cli.global).await
}

/// Settings from file and environment, with CLI flags as host overrides.
fn build_client_config(global: &GlobalOpts) -> Result<vellum_core::ClientConfig, CliError> {
    let mut settings = vellum_config::load_settings(global.config.as_deref())?;
    if let Some(ref key) = global.api_key {
        settings.api_key = Some(key.clone());
    }
    if let Some(ref url) = global.base_url {
        settings.base_url.clone_from(url);
    }
    Ok(settings.into_client_config(vellum_config::process_env)?)
}
