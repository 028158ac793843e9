//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;

use homeledger_core::{Account, AccountStatus, Decision};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn status_label(status: AccountStatus) -> String {
    match status {
        AccountStatus::Approved => status.as_str().green().to_string(),
        AccountStatus::Pending => status.as_str().yellow().to_string(),
        AccountStatus::Rejected => status.as_str().red().to_string(),
    }
}

pub fn decision_label(decision: &Decision) -> String {
    match decision.reason() {
        None => "allowed".green().to_string(),
        Some(reason) => format!("{} ({})", "denied".red(), reason.message()),
    }
}

/// Two decimal places, masked figures shown as a placeholder
pub fn format_amount(amount: Decimal, masked: bool) -> String {
    if masked {
        "•••".dimmed().to_string()
    } else {
        format!("{:.2}", amount)
    }
}

/// Table of accounts as shown by `roster` and `pending`
pub fn account_table(accounts: &[&Account]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Username", "Name", "Role", "Family", "Status", "Shares"]);
    for account in accounts {
        table.add_row(vec![
            account.username.clone(),
            account.name.clone(),
            account.role.label().to_string(),
            account
                .family_id
                .as_ref()
                .map(|f| f.to_string())
                .unwrap_or_else(|| "-".to_string()),
            status_label(account.status),
            if account.role.is_family_scoped() && account.allow_parent_view {
                "yes".to_string()
            } else {
                String::new()
            },
        ]);
    }
    table
}
