//! Handler for the `balance` command.

use serde_json::json;

use super::command::PlayerArgs;
use super::output;
use crate::application::BetService;
use crate::domain::PlayerId;
use crate::error::Result;
use crate::port::outbound::store::LedgerStore;

/// Execute the balance command.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn execute<S: LedgerStore>(service: &BetService<S>, args: &PlayerArgs) -> Result<()> {
    let player_id = PlayerId::new(args.player);
    let player = service.balance(player_id)?;

    if output::is_json() {
        output::json_output(&json!({
            "player_id": player_id,
            "balance": player.as_ref().map(|p| p.balance()),
            "version": player.as_ref().map(|p| p.version()),
        }));
        return Ok(());
    }

    match player {
        Some(player) => {
            output::field("Player", player.id());
            output::field("Balance", output::highlight(player.balance()));
        }
        None => output::warning(&format!("Unknown player {player_id}")),
    }
    Ok(())
}
