use colored::{ColoredString, Colorize};
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::ellipsize;
use crate::models::{PromoRecord, Urgency};
use crate::reports;

fn urgency_label(urgency: Urgency) -> ColoredString {
    let label = urgency.label();
    match urgency {
        Urgency::Expired => label.dimmed(),
        Urgency::Critical => label.red().bold(),
        Urgency::High => label.yellow().bold(),
        Urgency::Medium => label.yellow(),
        Urgency::Low => label.green(),
        Urgency::None => label.normal(),
    }
}

fn days_label(days: Option<i64>) -> String {
    match days {
        Some(d) if d < 0 => format!("{} ago", -d),
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}

pub fn print_json(records: &[PromoRecord]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

pub fn print_table(records: &[PromoRecord]) {
    if records.is_empty() {
        println!("No offers found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Code", "Discount", "Merchant", "Category", "Expires", "Days", "Urgency",
    ]);
    for r in records {
        table.add_row(vec![
            Cell::new(r.code.bold()),
            Cell::new(ellipsize(&r.discount, 40)),
            Cell::new(&r.merchant),
            Cell::new(&r.category),
            Cell::new(r.expiration.as_deref().unwrap_or("-")),
            Cell::new(days_label(r.days_remaining)),
            Cell::new(urgency_label(r.urgency)),
        ]);
    }
    println!("{table}");
}

pub fn print_summary(records: &[PromoRecord]) {
    let s = reports::summarize(records);
    println!();
    println!("Offers:         {}", s.total);
    println!("  with code:    {}", s.with_code);
    println!("  no code:      {}", s.no_code);
    println!("Expiring soon:  {}", s.expiring_soon);
    if s.expired > 0 {
        println!("Expired:        {}", s.expired);
    }
    println!("Undated:        {}", s.undated);

    let categories = reports::by_category(records);
    if !categories.is_empty() {
        let line = categories
            .iter()
            .map(|c| format!("{} {}", c.name, c.count))
            .collect::<Vec<_>>()
            .join(", ");
        println!("By category:    {line}");
    }
}

/// Table or JSON, then the summary for tables.
pub fn render(records: &[PromoRecord], json: bool) -> Result<()> {
    if json {
        print_json(records)
    } else {
        print_table(records);
        print_summary(records);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_label() {
        assert_eq!(days_label(Some(3)), "3");
        assert_eq!(days_label(Some(-2)), "2 ago");
        assert_eq!(days_label(None), "-");
    }
}
