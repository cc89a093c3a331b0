use chrono::NaiveDate;
use rayon::prelude::*;

use crate::assembler::assemble;
use crate::categorizer::{categorize_drafts, CategoryMap};
use crate::dedup::deduplicate;
use crate::error::{PromoError, Result};
use crate::models::{PromoDraft, PromoRecord, RawEmail};
use crate::urgency::enrich;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub today: NaiveDate,
    pub include_expired: bool,
    /// Assembly threads, 0 for the rayon default.
    pub workers: usize,
}

impl RunOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            include_expired: false,
            workers: 0,
        }
    }
}

fn assemble_one<F>(index: usize, email: &RawEmail, assemble: &F) -> Vec<PromoDraft>
where
    F: Fn(&RawEmail) -> Result<Vec<PromoDraft>>,
{
    match assemble(email) {
        Ok(drafts) => {
            tracing::debug!(email = index, drafts = drafts.len(), "assembled");
            drafts
        }
        Err(e) => {
            tracing::warn!(email = index, error = %e, "skipping email");
            Vec::new()
        }
    }
}

/// Run `assemble` over every email in parallel. A failing email contributes
/// no drafts; the rest are concatenated in input order.
pub fn assemble_with<F>(emails: &[RawEmail], assemble: F) -> Vec<PromoDraft>
where
    F: Fn(&RawEmail) -> Result<Vec<PromoDraft>> + Sync,
{
    let per_email: Vec<Vec<PromoDraft>> = emails
        .par_iter()
        .enumerate()
        .map(|(i, email)| assemble_one(i, email, &assemble))
        .collect();
    per_email.into_iter().flatten().collect()
}

pub fn assemble_all(emails: &[RawEmail]) -> Vec<PromoDraft> {
    assemble_with(emails, assemble)
}

/// Full batch transform: assemble, categorize, deduplicate, enrich.
pub fn run(
    emails: &[RawEmail],
    categories: &CategoryMap,
    opts: RunOptions,
) -> Result<Vec<PromoRecord>> {
    let drafts = if opts.workers > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.workers)
            .build()
            .map_err(|e| PromoError::Other(format!("could not start worker pool: {e}")))?;
        pool.install(|| assemble_all(emails))
    } else {
        assemble_all(emails)
    };

    let draft_count = drafts.len();
    let records = categorize_drafts(drafts, categories);
    let unique = deduplicate(records);
    let unique_count = unique.len();
    let results = enrich(unique, opts.today, opts.include_expired);

    tracing::info!(
        emails = emails.len(),
        drafts = draft_count,
        unique = unique_count,
        kept = results.len(),
        "batch complete"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Urgency, NO_CODE};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn batch() -> Vec<RawEmail> {
        vec![
            RawEmail::new(
                "Use promo code SAVE20 to get 20% off, expires January 15, 2025",
                "20% Off Sale",
                "deals@target.com",
            ),
            RawEmail::new(
                "Our service team is ready to help. LIVE support is available.",
                "Support update",
                "help@example.com",
            ),
            RawEmail::new(
                "Use code FLIGHT40 for 40% off. Valid through January 11, 2025.",
                "Fly for less",
                "Southwest Airlines <deals@southwest.com>",
            ),
            RawEmail::new(
                "Enjoy 15% off your next order.",
                "A gift for you",
                "hello@shop.example.com",
            ),
        ]
    }

    #[test]
    fn test_end_to_end() {
        let out = run(&batch(), &CategoryMap::builtin(), RunOptions::new(today())).unwrap();
        let codes: Vec<_> = out.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["FLIGHT40", "SAVE20", NO_CODE]);

        let flight = &out[0];
        assert_eq!(flight.days_remaining, Some(1));
        assert_eq!(flight.urgency, Urgency::Critical);
        assert_eq!(flight.category, "Flights");

        let save = &out[1];
        assert_eq!(save.merchant, "Target");
        assert_eq!(save.days_remaining, Some(5));
        assert_eq!(save.urgency, Urgency::Medium);

        assert_eq!(out[2].urgency, Urgency::None);
    }

    #[test]
    fn test_worker_cap_gives_same_result() {
        let cats = CategoryMap::builtin();
        let default = run(&batch(), &cats, RunOptions::new(today())).unwrap();
        let capped = run(
            &batch(),
            &cats,
            RunOptions {
                workers: 1,
                ..RunOptions::new(today())
            },
        )
        .unwrap();
        assert_eq!(default, capped);
    }

    #[test]
    fn test_assemble_all_keeps_input_order() {
        let emails = vec![
            RawEmail::new("Use code ZULU99 today", "", ""),
            RawEmail::new("Use code ALPHA99 today", "", ""),
        ];
        let codes: Vec<_> = assemble_all(&emails).into_iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["ZULU99", "ALPHA99"]);
    }

    #[test]
    fn test_failing_email_is_skipped() {
        let emails = vec![
            RawEmail::new("Use code FIRST10 today", "", ""),
            RawEmail::new("broken", "", ""),
            RawEmail::new("Use code THIRD10 today", "", ""),
        ];
        let drafts = assemble_with(&emails, |email| {
            if email.body == "broken" {
                Err(PromoError::Other("unreadable body".to_string()))
            } else {
                assemble(email)
            }
        });
        let codes: Vec<_> = drafts.into_iter().map(|d| d.code).collect();
        assert_eq!(codes, vec!["FIRST10", "THIRD10"]);
    }

    #[test]
    fn test_empty_category_map_gives_other() {
        let out = run(&batch(), &CategoryMap::default(), RunOptions::new(today())).unwrap();
        assert!(out.iter().all(|r| r.category == "Other"));
    }

    #[test]
    fn test_empty_batch() {
        assert!(run(&[], &CategoryMap::builtin(), RunOptions::new(today())).unwrap().is_empty());
    }
}
