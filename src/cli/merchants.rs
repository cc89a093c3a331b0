use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::importer::load_emails;
use crate::merchant::resolve_merchant;
use crate::models::UNKNOWN_MERCHANT;
use crate::reports::top_merchants;

const SUBJECT_WIDTH: usize = 48;

pub fn run(file: &str, top: usize) -> Result<()> {
    let emails = load_emails(file)?;
    if emails.is_empty() {
        println!("No emails in {file}.");
        return Ok(());
    }

    let mut resolved = Vec::with_capacity(emails.len());
    let mut table = Table::new();
    table.set_header(vec!["#", "Sender", "Subject", "Merchant"]);
    for (i, email) in emails.iter().enumerate() {
        let merchant = resolve_merchant(&email.subject, &email.sender).unwrap_or_else(|e| {
            tracing::warn!(email = i, error = %e, "merchant lookup failed");
            UNKNOWN_MERCHANT.to_string()
        });
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&email.sender),
            Cell::new(textwrap::fill(&email.subject, SUBJECT_WIDTH)),
            Cell::new(&merchant),
        ]);
        resolved.push(merchant);
    }
    println!("{table}");

    println!("\nTop merchants");
    for item in top_merchants(resolved.iter().map(String::as_str), top) {
        println!("  {:>4}  {}", item.count, item.name);
    }
    Ok(())
}
