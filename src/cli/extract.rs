use std::path::Path;

use crate::cli::output;
use crate::cli::parse_today;
use crate::error::Result;
use crate::importer::{load_emails, write_results};
use crate::pipeline::{self, RunOptions};
use crate::settings::{category_map, load_settings};

pub fn run(
    file: &str,
    categories: Option<&str>,
    today: Option<&str>,
    include_expired: bool,
    json: bool,
    output_path: Option<&str>,
) -> Result<()> {
    let settings = load_settings();
    let today = parse_today(today)?;
    let emails = load_emails(file)?;
    let map = category_map(categories, &settings);

    let opts = RunOptions {
        today,
        include_expired: include_expired || settings.include_expired,
        workers: settings.workers,
    };
    let records = pipeline::run(&emails, &map, opts)?;

    if let Some(path) = output_path {
        write_results(Path::new(path), &records)?;
        if !json {
            println!("Wrote {} offers to {path}", records.len());
        }
    }
    output::render(&records, json)
}
