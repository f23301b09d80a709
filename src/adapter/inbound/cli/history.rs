//! Handler for the `history` command.

use serde_json::json;

use super::command::PlayerArgs;
use super::output;
use crate::application::BetService;
use crate::domain::PlayerId;
use crate::error::Result;
use crate::port::outbound::store::LedgerStore;

const COLUMNS: [(&str, usize); 5] = [
    ("Bet", 6),
    ("Amount", 12),
    ("Before", 12),
    ("After", 12),
    ("Created", 25),
];

/// Execute the history command.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn execute<S: LedgerStore>(service: &BetService<S>, args: &PlayerArgs) -> Result<()> {
    let player_id = PlayerId::new(args.player);
    let transactions = service.history(player_id)?;

    if output::is_json() {
        output::json_output(&json!({
            "player_id": player_id,
            "transactions": transactions,
        }));
        return Ok(());
    }

    if transactions.is_empty() {
        output::warning(&format!("No transactions for player {player_id}"));
        return Ok(());
    }

    output::section(&format!("Player {player_id}"));
    output::table_header(&COLUMNS);
    let widths: Vec<usize> = COLUMNS.iter().map(|(_, width)| *width).collect();
    output::table_separator(&widths);
    for transaction in &transactions {
        output::table_row(
            &[
                transaction.bet_id.to_string(),
                format!("-{}", transaction.amount),
                transaction.amount_before.to_string(),
                (transaction.amount_before - transaction.amount).to_string(),
                transaction.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            ],
            &widths,
        );
    }
    Ok(())
}
