use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dazzle::config::BrowserConfig;
use dazzle::logging::LogSettings;
use dazzle::repository::{OpenApiRepository, SpecService};
use dazzle::runtime;
use std::sync::Arc;

/// Browse an OpenAPI description in the terminal
#[derive(Debug, Parser)]
#[command(name = "dazzle", version, about)]
struct Cli {
    /// Path or http(s) URL of the OpenAPI document
    source: String,
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!("{}", Cli::command().render_usage());
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = parse_cli();

    if let Err(err) = LogSettings::from_env().init() {
        println!("{err}");
        std::process::exit(1);
    }

    if let Err(err) = run(cli).await {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = BrowserConfig::from_env();
    let repo = OpenApiRepository::new()
        .context("failed to build document loader")?
        .with_schema_depth(config.schema_max_depth);
    let service = SpecService::new(Arc::new(repo));

    runtime::install_panic_hook();
    let mut terminal = runtime::setup_terminal().context("failed to set up terminal")?;
    let result = runtime::run(&mut terminal, config, service, cli.source).await;
    runtime::restore_terminal().context("failed to restore terminal")?;
    result.map_err(Into::into)
}
