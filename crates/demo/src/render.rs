use std::fmt::Write as _;

use ledger_accounts::Account;

use crate::config::OutputFormat;
use crate::scenario::summary;

/// Render one account for stdout in the configured format.
pub fn render(account: &Account, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(account)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&account.history_envelopes())?),
    }
}

fn render_text(account: &Account) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", summary(account));
    if let (Some(available), Some(used)) = (account.available_credit(), account.used_credit()) {
        let _ = writeln!(out, "  available {available}, used credit {used}");
    }
    for op in account.history() {
        let _ = writeln!(out, "  {op}");
    }
    out
}
