use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::error::Result;
use crate::rules::{self, RuleSpec, RuleTable};

// Tokens are matched case-insensitively and upper-cased afterwards;
// telling codes apart from ordinary words is left to the validator.
const CANDIDATE_RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "explicit_keyword",
        pattern: r"(?i)\b(?:promo\s+code|code|coupon|voucher)\s*:?\s+([A-Z0-9]{4,20})\b",
        priority: 1,
    },
    RuleSpec {
        name: "imperative",
        pattern: r"(?i)\b(?:use|enter|apply)\s+(?:(?:promo\s+)?code\s+)?([A-Z0-9]{4,20})\b",
        priority: 2,
    },
    RuleSpec {
        name: "checkout_suffix",
        pattern: r"(?i)\b([A-Z0-9]{4,20})\s+at\s+checkout",
        priority: 3,
    },
    RuleSpec {
        name: "checkout_prefix",
        pattern: r"(?i)\bcheckout\s+(?:with|using)\s+(?:code\s+)?([A-Z0-9]{4,20})\b",
        priority: 3,
    },
    RuleSpec {
        name: "discount_after",
        pattern: r"(?i)\b([A-Z0-9]{4,20})\s+(?:for|to\s+get|to\s+save)\s+(?:\d{1,3}%|\$\d+)",
        priority: 4,
    },
    RuleSpec {
        name: "discount_before",
        pattern: r"(?i)\b(?:save|get)\s+(?:\d{1,3}%|\$\d+)(?:\s+off)?\s+(?:with|using)(?:\s+code)?\s+([A-Z0-9]{4,20})\b",
        priority: 4,
    },
    RuleSpec {
        name: "assignment",
        pattern: r"(?i)\bcode\s*[=:]\s*([A-Z0-9]{4,20})\b",
        priority: 5,
    },
];

static TABLE: RuleTable = OnceLock::new();

/// Collect every substring of `body` that some rule family considers a
/// possible promo code. Candidates are upper-cased; an empty set means the
/// email names no explicit code.
pub fn scan_candidates(body: &str) -> Result<BTreeSet<String>> {
    let mut candidates = BTreeSet::new();
    if body.trim().is_empty() {
        return Ok(candidates);
    }
    for rule in rules::table(&TABLE, CANDIDATE_RULES)? {
        for caps in rule.regex.captures_iter(body) {
            if let Some(token) = caps.get(1) {
                tracing::debug!(rule = rule.name, token = token.as_str(), "candidate");
                candidates.insert(token.as_str().to_uppercase());
            }
        }
    }
    Ok(candidates)
}
