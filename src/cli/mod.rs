pub mod categories;
pub mod demo;
pub mod extract;
pub mod init;
pub mod merchants;
pub mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::error::{PromoError, Result};

/// Parse `--today`, falling back to the local calendar date.
pub(crate) fn parse_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| PromoError::InvalidDate(raw.to_string())),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[derive(Parser)]
#[command(
    name = "promoscan",
    about = "Pull promo codes, discounts and expiration dates out of marketing email."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the settings file and a default category map.
    Init {
        /// Category map to use instead of the bundled one
        #[arg(long)]
        categories: Option<String>,
    },
    /// Extract offers from a JSON batch of emails.
    Extract {
        /// Path to the email batch JSON, or '-' for stdin
        file: String,
        /// Category map JSON (default: from settings, else built-in)
        #[arg(long)]
        categories: Option<String>,
        /// Reference date: YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<String>,
        /// Keep offers that have already expired
        #[arg(long = "include-expired")]
        include_expired: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Also write the JSON result to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Run the extractor over a built-in set of sample emails.
    Demo {
        /// Reference date: YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the merchant resolved for each email in a batch.
    Merchants {
        /// Path to the email batch JSON, or '-' for stdin
        file: String,
        /// Number of top merchants to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// List the active category map.
    Categories {
        /// Category map JSON (default: from settings, else built-in)
        #[arg(long)]
        categories: Option<String>,
    },
}
