use std::sync::OnceLock;

use crate::error::Result;
use crate::rules::{self, RuleSpec, RuleTable};

// Each rule captures the date text in group 1. The month alternation is
// spelled out per rule because `regex` has no subroutine calls.
pub const EXPIRATION_RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "expires",
        pattern: r"(?i)\bexpir(?:es|ing|ation)\b[:\s]*(?:on\s+)?((?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2},\s*\d{4})",
        priority: 1,
    },
    RuleSpec {
        name: "valid_through",
        pattern: r"(?i)\bvalid\s+(?:through|thru|until|till)\s+((?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2},\s*\d{4})",
        priority: 2,
    },
    RuleSpec {
        name: "ends",
        pattern: r"(?i)\bends?\b[:\s]*(?:on\s+)?((?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2},\s*\d{4})",
        priority: 3,
    },
    RuleSpec {
        name: "numeric",
        pattern: r"\b(\d{1,2}/\d{1,2}/\d{4})\b",
        priority: 4,
    },
    RuleSpec {
        name: "bare_date",
        pattern: r"(?i)\b((?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2},\s*\d{4})\b",
        priority: 5,
    },
];

static TABLE: RuleTable = OnceLock::new();

/// Raw expiration text of the first rule that matches, unparsed.
pub fn extract_expiration(body: &str) -> Result<Option<String>> {
    for rule in rules::table(&TABLE, EXPIRATION_RULES)? {
        if let Some(date) = rule.regex.captures(body).and_then(|caps| caps.get(1)) {
            tracing::debug!(rule = rule.name, date = date.as_str(), "expiration");
            return Ok(Some(date.as_str().to_string()));
        }
    }
    Ok(None)
}
