//! Handler for the `submit` command.

use serde_json::json;

use super::command::SubmitArgs;
use super::output;
use crate::application::BetService;
use crate::domain::{PlayerId, SelectionRequest, SlipRequest};
use crate::error::Result;
use crate::port::inbound::betting::{BetResponse, ValidationResult};
use crate::port::outbound::store::LedgerStore;

/// Execute the submit command.
///
/// Returns whether the bet was accepted.
///
/// # Errors
/// Returns an error if the slip file cannot be read.
pub fn execute<S: LedgerStore>(service: &BetService<S>, args: &SubmitArgs) -> Result<bool> {
    let response = match &args.file {
        Some(path) => service.submit_json(&std::fs::read_to_string(path)?),
        None => {
            let request = SlipRequest {
                player_id: args.player.map(PlayerId::new),
                stake_amount: args.stake,
                selections: Some(
                    args.selections
                        .iter()
                        .map(|&(id, odds)| SelectionRequest {
                            id: Some(id),
                            odds: Some(odds),
                        })
                        .collect(),
                ),
            };
            BetResponse::from(service.submit_bet(&request))
        }
    };

    render(&response);
    Ok(response.is_accepted())
}

fn render(response: &BetResponse) {
    if output::is_json() {
        let payload = match response {
            BetResponse::Accepted(settlement) => json!({
                "status": response.status_code(),
                "settlement": settlement,
            }),
            BetResponse::Rejected(result) => json!({
                "status": response.status_code(),
                "response": result,
            }),
        };
        output::json_output(&payload);
        return;
    }

    match response {
        BetResponse::Accepted(settlement) => {
            output::success(&format!("Bet {} accepted", output::highlight(settlement.bet_id)));
            output::field("Player", settlement.player_id);
            output::field("Stake", settlement.stake());
            output::field(
                "Balance",
                format!(
                    "{} {} {}",
                    settlement.balance_before,
                    output::muted("→"),
                    settlement.balance_after
                ),
            );
            output::field("Transaction", settlement.transaction_id);
        }
        BetResponse::Rejected(result) => render_rejection(result),
    }
}

fn render_rejection(result: &ValidationResult) {
    output::warning("Bet rejected");
    for error in &result.global_errors {
        output::field(&format!("[{}]", error.code), &error.message);
    }
    for selection in &result.selection_errors {
        output::section(&format!("Selection {}", selection.selection_id));
        for error in &selection.errors {
            output::field(&format!("[{}]", error.code), &error.message);
        }
    }
}
