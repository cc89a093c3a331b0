use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::settings::{category_map, load_settings};

pub fn run(categories: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let map = category_map(categories, &settings);

    if map.is_empty() {
        println!("No categories loaded; every offer will be filed under Other.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Keywords"]);
    for (name, keywords) in map.entries() {
        table.add_row(vec![Cell::new(name), Cell::new(keywords.join(", "))]);
    }
    println!("Categories\n{table}");
    Ok(())
}
