use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::discount::discount_value;
use crate::models::{PromoRecord, Urgency};

/// Parse `M/D/YYYY` (or `M/D/YY`, read as 20YY).
pub fn parse_date_mdy(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let m: u32 = parts[0].parse().ok()?;
    let d: u32 = parts[1].parse().ok()?;
    let y: i32 = match parts[2].len() {
        2 => 2000 + parts[2].parse::<i32>().ok()?,
        4 => parts[2].parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Parse `Month D, YYYY` with full or abbreviated month names.
pub fn parse_date_long(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.replace(['.', ','], " ");
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let [month, day, year] = words.as_slice() else {
        return None;
    };
    let month = match month.to_lowercase().as_str() {
        "sept" => "sep".to_string(),
        other => other.to_string(),
    };
    let normalized = format!("{month} {day}, {year}");
    NaiveDate::parse_from_str(&normalized, "%B %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(&normalized, "%b %d, %Y"))
        .ok()
}

pub fn parse_expiration(raw: &str) -> Option<NaiveDate> {
    parse_date_long(raw).or_else(|| parse_date_mdy(raw))
}

pub fn days_remaining(expiration: Option<&str>, today: NaiveDate) -> Option<i64> {
    let date = parse_expiration(expiration?)?;
    Some((date - today).num_days())
}

fn compare(a: &(PromoRecord, f64), b: &(PromoRecord, f64)) -> Ordering {
    let by_days = match (a.0.days_remaining, b.0.days_remaining) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_days.then_with(|| b.1.total_cmp(&a.1))
}

/// Fill in days remaining and urgency, drop expired offers unless asked to
/// keep them, and order the list soonest-first, biggest discount next.
pub fn enrich(
    records: Vec<PromoRecord>,
    today: NaiveDate,
    include_expired: bool,
) -> Vec<PromoRecord> {
    let mut keyed: Vec<(PromoRecord, f64)> = records
        .into_iter()
        .map(|mut record| {
            record.days_remaining = days_remaining(record.expiration.as_deref(), today);
            record.urgency = Urgency::from_days(record.days_remaining);
            record
        })
        .filter(|record| include_expired || record.urgency != Urgency::Expired)
        .map(|record| {
            let value = discount_value(&record.discount).unwrap_or_else(|e| {
                tracing::warn!(code = %record.code, error = %e, "could not rank discount");
                0.0
            });
            (record, value)
        })
        .collect();

    keyed.sort_by(compare);
    keyed.into_iter().map(|(record, _)| record).collect()
}
