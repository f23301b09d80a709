use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use betslip::adapter::inbound::cli::command::{Cli, Commands};
use betslip::adapter::inbound::cli::output::{self, OutputConfig};
use betslip::adapter::inbound::cli::{balance, codes, history, submit};
use betslip::infrastructure::bootstrap::build_service;
use betslip::infrastructure::config::settings::Config;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = Config::discover(cli.config.as_deref()).context("failed to load config")?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    config.init_logging();
    debug!(database = %config.database, "Configuration loaded");

    if let Commands::Codes = cli.command {
        codes::execute();
        return Ok(ExitCode::SUCCESS);
    }

    let service = build_service(&config)
        .with_context(|| format!("failed to open database {}", config.database))?;

    match &cli.command {
        Commands::Submit(args) => {
            let accepted = submit::execute(&service, args).context("failed to submit slip")?;
            Ok(if accepted {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Balance(args) => {
            balance::execute(&service, args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::History(args) => {
            history::execute(&service, args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Codes => Ok(ExitCode::SUCCESS),
    }
}
