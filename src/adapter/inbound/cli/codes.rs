//! Handler for the `codes` command.

use serde_json::json;

use super::output;
use crate::domain::ErrorCatalog;

/// Execute the codes command.
pub fn execute() {
    let catalog = ErrorCatalog::global();

    if output::is_json() {
        let entries: Vec<_> = catalog
            .iter()
            .map(|(kind, entry)| {
                json!({
                    "code": entry.code,
                    "kind": kind,
                    "template": entry.template,
                })
            })
            .collect();
        output::json_output(&json!(entries));
        return;
    }

    for (kind, entry) in catalog.iter() {
        println!(
            "  {}  {:<22} {}",
            output::highlight(format!("{:>3}", entry.code)),
            kind.as_str(),
            entry.template
        );
    }
}
