//! Command-line interface definitions.
//!
//! Defines the CLI structure for the betslip application using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use crate::domain::SelectionId;

/// Bet slip validation and settlement CLI
#[derive(Parser, Debug)]
#[command(name = "betslip")]
#[command(version)]
pub struct Cli {
    /// Configuration file [default: config.toml if present]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SQLite database path, overriding the configuration
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<String>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the betslip CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate and settle a bet slip
    Submit(SubmitArgs),

    /// Show a player's balance
    Balance(PlayerArgs),

    /// List a player's balance transactions
    History(PlayerArgs),

    /// Print the error catalog
    Codes,
}

/// Arguments for `betslip submit`.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Player placing the bet
    #[arg(long, required_unless_present = "file")]
    pub player: Option<i64>,

    /// Stake amount
    #[arg(long, required_unless_present = "file")]
    pub stake: Option<Decimal>,

    /// A selection as ID@ODDS; repeat for each leg
    #[arg(
        long = "selection",
        value_name = "ID@ODDS",
        value_parser = parse_selection
    )]
    pub selections: Vec<(SelectionId, Decimal)>,

    /// Read the slip as JSON from a file instead
    #[arg(long, value_name = "PATH", conflicts_with_all = ["player", "stake", "selections"])]
    pub file: Option<PathBuf>,
}

/// Arguments selecting one player.
#[derive(Args, Debug)]
pub struct PlayerArgs {
    /// Player ID
    #[arg(long)]
    pub player: i64,
}

/// Parse a selection written as `ID@ODDS`.
///
/// # Errors
/// Returns a message if the separator is missing or either part is invalid.
pub fn parse_selection(value: &str) -> Result<(SelectionId, Decimal), String> {
    let (id, odds) = value
        .split_once('@')
        .ok_or_else(|| format!("expected ID@ODDS, got '{value}'"))?;
    let id: i64 = id
        .trim()
        .parse()
        .map_err(|e| format!("invalid selection id '{id}': {e}"))?;
    let odds: Decimal = odds
        .trim()
        .parse()
        .map_err(|e| format!("invalid odds '{odds}': {e}"))?;
    Ok((SelectionId::new(id), odds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_selection_accepts_id_and_odds() {
        assert_eq!(
            parse_selection("42@1.75").unwrap(),
            (SelectionId::new(42), dec!(1.75))
        );
    }

    #[test]
    fn parse_selection_rejects_malformed_input() {
        assert!(parse_selection("42").is_err());
        assert!(parse_selection("x@2").is_err());
        assert!(parse_selection("42@high").is_err());
    }

    #[test]
    fn submit_collects_repeated_selections() {
        let cli = Cli::try_parse_from([
            "betslip",
            "--json",
            "submit",
            "--player",
            "7",
            "--stake",
            "12.5",
            "--selection",
            "1@2",
            "--selection",
            "2@3.5",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.player, Some(7));
        assert_eq!(args.stake, Some(dec!(12.5)));
        assert_eq!(args.selections.len(), 2);
    }

    #[test]
    fn submit_file_conflicts_with_inline_slip() {
        let result = Cli::try_parse_from([
            "betslip", "submit", "--file", "slip.json", "--player", "1",
        ]);
        assert!(result.is_err());
    }
}
