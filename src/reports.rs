use std::collections::HashMap;

use crate::models::{PromoRecord, Urgency, NO_CODE};

pub struct CountItem {
    pub name: String,
    pub count: usize,
}

pub struct Summary {
    pub total: usize,
    pub with_code: usize,
    pub no_code: usize,
    /// Offers with a week or less left (critical, high and medium).
    pub expiring_soon: usize,
    pub expired: usize,
    pub undated: usize,
}

/// Count `key(item)` occurrences, most frequent first; ties keep first-seen order.
fn tally<'a, T>(
    items: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> &'a str,
) -> Vec<CountItem> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<CountItem> = Vec::new();
    for item in items {
        let name = key(&item);
        match index.get(name) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(CountItem {
                    name: name.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn by_category(records: &[PromoRecord]) -> Vec<CountItem> {
    tally(records, |r| r.category.as_str())
}

pub fn top_merchants<'a>(
    merchants: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<CountItem> {
    let mut counts = tally(merchants, |m| *m);
    counts.truncate(limit);
    counts
}

pub fn summarize(records: &[PromoRecord]) -> Summary {
    let mut s = Summary {
        total: records.len(),
        with_code: 0,
        no_code: 0,
        expiring_soon: 0,
        expired: 0,
        undated: 0,
    };
    for r in records {
        if r.code == NO_CODE {
            s.no_code += 1;
        } else {
            s.with_code += 1;
        }
        match r.urgency {
            Urgency::Critical | Urgency::High | Urgency::Medium => s.expiring_soon += 1,
            Urgency::Expired => s.expired += 1,
            _ => {}
        }
        if r.days_remaining.is_none() {
            s.undated += 1;
        }
    }
    s
}
