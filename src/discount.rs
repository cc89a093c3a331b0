use std::sync::OnceLock;

use crate::error::Result;
use crate::rules::{self, LazyRegex, RuleSpec, RuleTable};

pub const DISCOUNT_RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "percent_off",
        pattern: r"(?i)\b\d{1,3}%\s*off\b",
        priority: 1,
    },
    RuleSpec {
        name: "dollar_off",
        pattern: r"(?i)\$\d+(?:\.\d{2})?\s*off\b",
        priority: 2,
    },
    RuleSpec {
        name: "save_percent",
        pattern: r"(?i)\bsave\s+\d{1,3}%",
        priority: 3,
    },
    RuleSpec {
        name: "save_dollar",
        pattern: r"(?i)\bsave\s+\$\d+(?:\.\d{2})?",
        priority: 4,
    },
    RuleSpec {
        name: "bogo",
        pattern: r"(?i)\bbogo\b|\bbuy\s+(?:one|1)\b[^.!?\n]{0,30}?\bget\s+(?:one|1)(?:\s+(?:free|half\s+off))?\b",
        priority: 5,
    },
    RuleSpec {
        name: "free_shipping",
        pattern: r"(?i)\bfree\s+(?:standard\s+)?shipping\b",
        priority: 6,
    },
    RuleSpec {
        name: "up_to_percent",
        pattern: r"(?i)\bup\s+to\s+\d{1,3}%\s*off\b",
        priority: 7,
    },
];

static TABLE: RuleTable = OnceLock::new();

/// Every discount phrase in `body`, in rule order then match order.
pub fn extract_discounts(body: &str) -> Result<Vec<String>> {
    let mut found = Vec::new();
    for rule in rules::table(&TABLE, DISCOUNT_RULES)? {
        for m in rule.regex.find_iter(body) {
            found.push(m.as_str().trim().to_string());
        }
    }
    Ok(found)
}

static PERCENT: LazyRegex = OnceLock::new();
static DOLLARS: LazyRegex = OnceLock::new();

/// Weight used to rank dollar discounts against percentages.
pub const DOLLAR_WEIGHT: f64 = 2.0;
/// Value assigned to free shipping and buy-one-get-one phrasing.
pub const FREEBIE_VALUE: f64 = 50.0;

/// Numeric sort key for a discount phrase: percentages at face value,
/// dollars times `DOLLAR_WEIGHT`, freebies at `FREEBIE_VALUE`.
pub fn discount_value(discount: &str) -> Result<f64> {
    if let Some(caps) = rules::regex(&PERCENT, r"(\d+(?:\.\d+)?)%")?.captures(discount) {
        return Ok(caps[1].parse().unwrap_or(0.0));
    }
    if let Some(caps) = rules::regex(&DOLLARS, r"\$(\d+(?:\.\d+)?)")?.captures(discount) {
        let dollars: f64 = caps[1].parse().unwrap_or(0.0);
        return Ok(dollars * DOLLAR_WEIGHT);
    }
    let lower = discount.to_lowercase();
    if lower.contains("free") || lower.contains("bogo") {
        return Ok(FREEBIE_VALUE);
    }
    Ok(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_off() {
        assert_eq!(
            extract_discounts("Use promo code SAVE20 to get 20% off, expires soon").unwrap(),
            vec!["20% off"]
        );
    }

    #[test]
    fn test_rule_order_beats_text_order() {
        // free shipping appears first in the text but ranks below percent-off
        let found = extract_discounts("FREE SHIPPING on all orders plus an extra 15% off").unwrap();
        assert_eq!(found, vec!["15% off", "FREE SHIPPING"]);
    }

    #[test]
    fn test_dollar_and_save_phrases() {
        let found = extract_discounts("Get $50 off tickets. Save $5 more today.").unwrap();
        assert_eq!(found, vec!["$50 off", "Save $5"]);
    }

    #[test]
    fn test_bogo_phrasing() {
        let found = extract_discounts("Buy 1 large pizza, get 1 FREE!").unwrap();
        assert_eq!(found, vec!["Buy 1 large pizza, get 1 FREE"]);
        assert_eq!(extract_discounts("BOGO weekend").unwrap(), vec!["BOGO"]);
    }

    #[test]
    fn test_up_to_is_collected_after_plain_percent() {
        let found = extract_discounts("Save up to 60% off regular prices").unwrap();
        assert_eq!(found, vec!["60% off", "up to 60% off"]);
    }

    #[test]
    fn test_no_discount() {
        assert!(extract_discounts("Our service team is ready to help.").unwrap().is_empty());
    }

    #[test]
    fn test_discount_value() {
        assert_eq!(discount_value("40% off").unwrap(), 40.0);
        assert_eq!(discount_value("$50 off").unwrap(), 100.0);
        assert_eq!(discount_value("FREE SHIPPING").unwrap(), 50.0);
        assert_eq!(discount_value("BOGO").unwrap(), 50.0);
        assert_eq!(discount_value("see email").unwrap(), 0.0);
    }

    #[test]
    fn test_dollar_weight_is_monotonic() {
        let small = discount_value("$10 off").unwrap();
        let large = discount_value("$25 off").unwrap();
        assert!(large > small);
    }
}
